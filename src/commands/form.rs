//! # Form Command Handler
//!
//! This module handles client-form CLI commands: creation, retrieval,
//! listing, partial update, and deletion.

use handled::Handle;

use crate::{
    ApiResponse, CreateFormRequest, FormId, UpdateFormRequest, cli_utils,
    commands::errors::format_cli_error, http_utils,
};

const FORM_USAGE: &str = "Usage: intakectl form <create|get|list|update|delete> [args...]";

const CREATE_USAGE: &str = "Usage: intakectl form create <full-name> <email> <phone> <message>";
const GET_USAGE: &str = "Usage: intakectl form get <form-id>";
const LIST_USAGE: &str = "Usage: intakectl form list";
const UPDATE_USAGE: &str =
    "Usage: intakectl form update <form-id> <field> <value> [<field> <value>...]\n\
     Fields: full_name, email, phone, message";
const DELETE_USAGE: &str = "Usage: intakectl form delete <form-id>";

/// Handles all form-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `client` - HTTP client for API communication
/// * `json_output` - Emit raw JSON envelopes instead of the human layout
pub async fn handle_form_command(
    args: &[String],
    client: &http_utils::IntakeClient,
    json_output: bool,
) {
    if args.is_empty() {
        cli_utils::exit_with_usage_error("form command requires a subcommand", FORM_USAGE);
    }

    match args[0].as_str() {
        "create" => handle_form_create(args, client, json_output).await,
        "get" => handle_form_get(args, client, json_output).await,
        "list" => handle_form_list(args, client, json_output).await,
        "update" => handle_form_update(args, client, json_output).await,
        "delete" => handle_form_delete(args, client, json_output).await,
        _ => {
            cli_utils::exit_with_error(&format!(
                "Unknown form subcommand '{}'. Available subcommands: create, get, list, update, delete",
                args[0]
            ));
        }
    }
}

fn print_outcome(envelope: &ApiResponse, json_output: bool) {
    if json_output {
        cli_utils::print_json_or_exit(envelope, "response");
    } else {
        cli_utils::print_envelope(envelope);
    }
}

/// Validates and parses a form id, exiting with a friendly message on
/// failure.
fn parse_form_id_or_exit(id_str: &str) -> FormId {
    id_str.parse().unwrap_or_else(|e: crate::FormIdParseError| {
        if let Some(user_error) = e.handle() {
            if let Some(ref hint) = user_error.usage_hint {
                cli_utils::exit_with_usage_error(&user_error.message, hint);
            } else {
                cli_utils::exit_with_error(&user_error.message);
            }
        }
        cli_utils::exit_with_error(&format_cli_error(&e));
    })
}

fn parse_phone_or_exit(phone_str: &str) -> i64 {
    phone_str.parse().unwrap_or_else(|_| {
        cli_utils::exit_with_error(&format!("Invalid phone number '{}'", phone_str));
    })
}

async fn handle_form_create(
    args: &[String],
    client: &http_utils::IntakeClient,
    json_output: bool,
) {
    if args.len() != 5 {
        cli_utils::exit_with_usage_error("create command takes four arguments", CREATE_USAGE);
    }

    let request = CreateFormRequest {
        full_name: args[1].clone(),
        email: args[2].clone(),
        phone: parse_phone_or_exit(&args[3]),
        message: args[4].clone(),
    };

    let envelope = http_utils::execute_or_exit(
        || client.post::<CreateFormRequest, ApiResponse>("form", &request),
        "Failed to create form",
    )
    .await;

    print_outcome(&envelope, json_output);
}

async fn handle_form_get(
    args: &[String],
    client: &http_utils::IntakeClient,
    json_output: bool,
) {
    if args.len() != 2 {
        cli_utils::exit_with_usage_error("get command takes one argument", GET_USAGE);
    }

    let form_id = parse_form_id_or_exit(&args[1]);
    let path = format!("form/{}", form_id);

    let envelope = http_utils::execute_or_exit(
        || client.get::<ApiResponse>(&path),
        "Failed to get form",
    )
    .await;

    print_outcome(&envelope, json_output);
}

async fn handle_form_list(
    args: &[String],
    client: &http_utils::IntakeClient,
    json_output: bool,
) {
    if args.len() != 1 {
        cli_utils::exit_with_usage_error("list command takes no arguments", LIST_USAGE);
    }

    let envelope = http_utils::execute_or_exit(
        || client.get::<ApiResponse>("form"),
        "Failed to list forms",
    )
    .await;

    print_outcome(&envelope, json_output);
}

async fn handle_form_update(
    args: &[String],
    client: &http_utils::IntakeClient,
    json_output: bool,
) {
    if args.len() < 4 || args.len() % 2 != 0 {
        cli_utils::exit_with_usage_error(
            "update command takes a form id followed by field/value pairs",
            UPDATE_USAGE,
        );
    }

    let form_id = parse_form_id_or_exit(&args[1]);

    let mut request = UpdateFormRequest::default();
    for pair in args[2..].chunks(2) {
        let (field, value) = (pair[0].as_str(), &pair[1]);
        match field {
            "full_name" => request.full_name = Some(value.clone()),
            "email" => request.email = Some(value.clone()),
            "phone" => request.phone = Some(parse_phone_or_exit(value)),
            "message" => request.message = Some(value.clone()),
            _ => {
                cli_utils::exit_with_usage_error(
                    &format!("Unknown field '{}'", field),
                    UPDATE_USAGE,
                );
            }
        }
    }

    let path = format!("form/{}", form_id);
    let envelope = http_utils::execute_or_exit(
        || client.put::<UpdateFormRequest, ApiResponse>(&path, &request),
        "Failed to update form",
    )
    .await;

    print_outcome(&envelope, json_output);
}

async fn handle_form_delete(
    args: &[String],
    client: &http_utils::IntakeClient,
    json_output: bool,
) {
    if args.len() != 2 {
        cli_utils::exit_with_usage_error("delete command takes one argument", DELETE_USAGE);
    }

    let form_id = parse_form_id_or_exit(&args[1]);
    let path = format!("form/{}", form_id);

    let envelope = http_utils::execute_or_exit(
        || client.delete::<ApiResponse>(&path),
        "Failed to delete form",
    )
    .await;

    print_outcome(&envelope, json_output);
}
