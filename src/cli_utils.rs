use std::process;

use crate::{ApiResponse, ClientForm};

/// Exits the program with an error message.
pub fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exits the program with an error message and usage information.
pub fn exit_with_usage_error(message: &str, usage: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", usage);
    process::exit(1);
}

/// Prints formatted JSON with proper indentation.
pub fn print_json<T>(value: &T) -> Result<(), serde_json::Error>
where
    T: serde::Serialize,
{
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a formatted JSON value or exits with error.
pub fn print_json_or_exit<T>(value: &T, context: &str)
where
    T: serde::Serialize,
{
    if let Err(e) = print_json(value) {
        exit_with_error(&format!("Failed to format {} JSON: {}", context, e));
    }
}

/// Prints a response envelope in a human-readable layout: the messages first,
/// then one block per record.
pub fn print_envelope(envelope: &ApiResponse) {
    for message in &envelope.message {
        println!("{}", message);
    }
    for form in &envelope.data {
        println!();
        print_form(form);
    }
}

/// Prints a single client form record.
pub fn print_form(form: &ClientForm) {
    println!("id:         {}", form.id);
    println!("full_name:  {}", form.full_name);
    println!("email:      {}", form.email);
    println!("phone:      {}", form.phone);
    println!("message:    {}", form.message);
    println!("created_at: {}", form.created_at);
    println!("updated_at: {}", form.updated_at);
}
