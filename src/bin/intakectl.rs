use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use intake::cli_utils;
use intake::commands::form::handle_form_command;
use intake::http_utils::IntakeClient;

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of the intake API server")]
    url: Option<String>,
    #[arrrg(flag, "Emit raw JSON envelopes instead of the human-readable layout")]
    json: bool,
}

const USAGE: &str = r#"Usage: intakectl [--url <URL>] [--json] <command> [args...]

Commands:
  form create <full-name> <email> <phone> <message>   Create a client form
  form get <form-id>                                  Get a client form
  form list                                           List all client forms
  form update <form-id> <field> <value> [...]         Update form fields
  form delete <form-id>                               Delete a client form
  help                                                Show this message

Options:
  --url <URL>    Base URL of the intake API server [default: http://127.0.0.1:8080]
  --json         Emit raw JSON envelopes instead of the human-readable layout"#;

#[tokio::main]
async fn main() {
    let (options, free) = Options::from_command_line(USAGE);

    if free.is_empty() || free[0] == "help" {
        println!("{}", USAGE);
        return;
    }

    let base_url = options
        .url
        .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    let client = IntakeClient::new(base_url);

    match free[0].as_str() {
        "form" => handle_form_command(&free[1..], &client, options.json).await,
        _ => {
            cli_utils::exit_with_usage_error(
                &format!("Unknown command '{}'", free[0]),
                USAGE,
            );
        }
    }
}
