//! Signup Example
//!
//! Builds a signup form from attribute lists, simulates a few rounds of
//! user input and submit clicks, and prints what the form reports.
//!
//! Run with `cargo run -p complex-form --example signup`; debug logs go to
//! `signup.log`.

use std::fs::File;
use std::time::Duration;

use complex_form::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Form markup
// ============================================================================

fn build() -> Result<(Node, Vec<Field>), ConfigError> {
    let email = Field::new(FieldConfig::from_attributes([
        ("type", "email"),
        ("name", "email"),
        ("field", "Email"),
        ("placeholder", "you@example.com"),
        ("autocomplete", "email"),
        ("required", ""),
        ("required-label", "is required"),
    ]))?;

    let password = Field::new(FieldConfig::from_json(
        r#"{"type": "password", "name": "password", "field": "Password",
            "required": true, "required-label": "is required"}"#,
    )?)?;

    let confirm = Field::new(
        FieldConfig::new(InputKind::Password)
            .with_name("confirm")
            .with_field_label("Confirmation")
            .with_match("password"),
    )?;

    let root = Node::element(
        "div",
        vec![
            Node::element("fieldset", vec![email.clone().into(), password.clone().into()]),
            confirm.clone().into(),
            Button::new(ButtonType::Reset, "Reset").into(),
            Button::submit("Sign up").into(),
        ],
    );

    Ok((root, vec![email, password, confirm]))
}

fn report(fields: &[Field]) {
    for field in fields {
        match field.error() {
            Some(error) => println!("  {:<14} {}", field.field_label(), error),
            None => println!("  {:<14} ok", field.field_label()),
        }
    }
}

async fn click_and_wait(form: &Form) -> Option<FormEvent> {
    let mut events = form.subscribe();
    form.submit_control().click();
    tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .ok()
        .flatten()
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("signup.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let (root, fields) = match build() {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let form = match Form::mount(&root) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let (email, password, confirm) = (&fields[0], &fields[1], &fields[2]);

    println!("Round 1: empty form");
    println!("{:?}", click_and_wait(&form).await);
    report(&fields);

    println!("Round 2: bad email, short password");
    email.input("jane.example.com");
    password.input("abc");
    confirm.input("abc");
    println!("{:?}", click_and_wait(&form).await);
    report(&fields);

    println!("Round 3: confirmation differs");
    email.input("jane@example.com");
    password.input("hunter22");
    confirm.input("hunter23");
    println!("{:?}", click_and_wait(&form).await);
    report(&fields);

    println!("Round 4: all good");
    confirm.input("hunter22");
    println!("{:?}", click_and_wait(&form).await);
    report(&fields);

    form.reset();
}
