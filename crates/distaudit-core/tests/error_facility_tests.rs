use distaudit_core::errors::{AuditError, ExError, ExErrorKind};

#[test]
fn test_malformed_markup_carries_position() {
    let err = AuditError::MalformedMarkup {
        position: 17,
        message: "unexpected end tag".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedMarkup);
    assert_eq!(ex_err.code(), "ERR_MALFORMED_MARKUP");
    assert_eq!(ex_err.position(), Some(17));
    assert_eq!(ex_err.op(), Some("parse_snapshot"));
    assert!(ex_err.message().contains("unexpected end tag"));
}

#[test]
fn test_date_mismatch_names_identifier() {
    let err = AuditError::DateMismatch {
        identifier: "audit-2008-01-23.html".to_string(),
        expected: "2008-01-23".to_string(),
        found: "2008-01-22".to_string(),
    };
    assert!(err.to_string().contains("audit-2008-01-23.html"));

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DateMismatch);
    assert_eq!(ex_err.identifier(), Some("audit-2008-01-23.html"));
    assert_ne!(ex_err.kind(), ExErrorKind::MalformedMarkup);
}

#[test]
fn test_invalid_identifier_structured_fields() {
    let ex_err: ExError = AuditError::InvalidIdentifier {
        identifier: "notes.html".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidIdentifier);
    assert_eq!(ex_err.code(), "ERR_INVALID_IDENTIFIER");
    assert_eq!(ex_err.identifier(), Some("notes.html"));
}

#[test]
fn test_io_error_keeps_path() {
    let ex_err: ExError = AuditError::Io {
        path: "/srv/dist/audit".to_string(),
        message: "permission denied".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.identifier(), Some("/srv/dist/audit"));
    assert!(ex_err.to_string().contains("permission denied"));
}

#[test]
fn test_serde_json_error_maps_to_serialization() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let ex_err: ExError = AuditError::from(json_err).into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::MalformedMarkup, "ERR_MALFORMED_MARKUP"),
        (ExErrorKind::DateMismatch, "ERR_DATE_MISMATCH"),
        (ExErrorKind::InvalidIdentifier, "ERR_INVALID_IDENTIFIER"),
        (ExErrorKind::MissingDigest, "ERR_MISSING_DIGEST"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_display_format_with_source() {
    let inner = ExError::new(ExErrorKind::Io).with_message("read failed");
    let outer = ExError::new(ExErrorKind::MalformedMarkup)
        .with_op("load_snapshot")
        .with_identifier("audit-2008-01-22.html")
        .with_position(3)
        .with_source(inner);

    let rendered = outer.to_string();
    assert!(rendered.starts_with("[ERR_MALFORMED_MARKUP] in operation 'load_snapshot'"));
    assert!(rendered.contains("(identifier: audit-2008-01-22.html)"));
    assert!(rendered.contains("(position: 3)"));
    assert!(rendered.contains("caused by [ERR_IO]: read failed"));
}
