// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Translation of `validator` rule violations into user-facing messages.
//!
//! Rules are declared on the request types with `#[validate(...)]`; this
//! module turns the resulting [`ValidationErrors`] into one Portuguese
//! message per violation. Every violation is reported, ordered by field name
//! so responses are stable.

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Flatten and translate all field errors, sorted by field.
pub fn translate_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(&str, &Vec<ValidationError>)> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => Some((field.as_ref(), errs)),
            _ => None,
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |err| translate(field, err)))
        .collect()
}

/// Message for a single rule violation on `field`.
pub fn translate(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("{field} {message}");
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());

    match error.code.as_ref() {
        "required" => format!("{field} é um campo obrigatório"),
        "range" => {
            if let Some(min) = param("exclusive_min") {
                format!("{field} deve ser maior que {min}")
            } else if let Some(max) = param("exclusive_max") {
                format!("{field} deve ser menor que {max}")
            } else {
                match (param("min"), param("max")) {
                    (Some(min), Some(max)) => format!("{field} deve estar entre {min} e {max}"),
                    (Some(min), None) => format!("{field} deve ser maior ou igual a {min}"),
                    (None, Some(max)) => format!("{field} deve ser menor ou igual a {max}"),
                    (None, None) => format!("{field} está fora do intervalo permitido"),
                }
            }
        }
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => {
                format!("{field} deve ter entre {min} e {max} caracteres")
            }
            (Some(min), None) => format!("{field} deve ter no mínimo {min} caracteres"),
            (None, Some(max)) => format!("{field} deve ter no máximo {max} caracteres"),
            (None, None) => format!("{field} tem tamanho inválido"),
        },
        _ => format!("{field} é inválido"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransferRequest;
    use validator::Validate;

    #[test]
    fn all_violations_are_reported_in_field_order() {
        let request = TransferRequest {
            account_origin_id: 1,
            destination: None,
            amount: Some(0.0),
            description: Some("x".repeat(200)),
        };

        let errors = request.validate().unwrap_err();
        let messages = translate_errors(&errors);

        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("amount deve ser maior que"));
        assert_eq!(messages[1], "description deve ter no máximo 140 caracteres");
        assert_eq!(messages[2], "destination é um campo obrigatório");
    }

    #[test]
    fn missing_origin_is_reported() {
        let request = TransferRequest {
            account_origin_id: 0,
            destination: Some(2),
            amount: Some(1.0),
            description: None,
        };

        let messages = translate_errors(&request.validate().unwrap_err());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("account_origin_id deve ser maior ou igual a 1"));
    }

    #[test]
    fn custom_message_takes_precedence() {
        let error = ValidationError::new("custom").with_message("não pode ser vazio".into());
        assert_eq!(translate("name", &error), "name não pode ser vazio");
    }

    #[test]
    fn unknown_code_falls_back() {
        let error = ValidationError::new("email");
        assert_eq!(translate("contact", &error), "contact é inválido");
    }
}
