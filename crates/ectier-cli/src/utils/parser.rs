use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid EC number '{0}'. Expected up to four dot-separated fields of digits, 'n' plus digits, or '-' (e.g., '3.1.1.74')."
    )]
    InvalidEcNumber(String),

    #[error("Invalid evidence code '{0}'. Expected 'ECO:' followed by seven digits (e.g., 'ECO:0000269').")]
    InvalidEvidenceCode(String),

    #[error("Component '{component}' cannot be empty in '{value}'.")]
    EmptyComponent {
        component: &'static str,
        value: String,
    },
}

fn is_ec_field(field: &str) -> bool {
    let digits = field.strip_prefix('n').unwrap_or(field);
    field == "-" || (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Validates a target EC number and returns it trimmed. Matching stays exact-string,
/// so `3.1.1.-` only ever matches records annotated with `3.1.1.-` itself.
pub fn parse_ec_number(raw: &str) -> Result<String, ParseError> {
    let ec = raw.trim();
    if ec.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "EC number",
            value: raw.to_string(),
        });
    }
    let fields: Vec<&str> = ec.split('.').collect();
    if fields.len() > 4 || !fields.iter().all(|field| is_ec_field(field)) {
        return Err(ParseError::InvalidEcNumber(ec.to_string()));
    }
    Ok(ec.to_string())
}

/// Validates an evidence code of the form `ECO:nnnnnnn`, normalizing the prefix case.
pub fn parse_evidence_code(raw: &str) -> Result<String, ParseError> {
    let code = raw.trim();
    let Some((prefix, digits)) = code.split_once(':') else {
        return Err(ParseError::InvalidEvidenceCode(code.to_string()));
    };
    if !prefix.eq_ignore_ascii_case("eco")
        || digits.len() != 7
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseError::InvalidEvidenceCode(code.to_string()));
    }
    Ok(format!("ECO:{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_partial_and_preliminary_ec_numbers() {
        assert_eq!(parse_ec_number(" 3.1.1.74 ").unwrap(), "3.1.1.74");
        assert_eq!(parse_ec_number("3.1.1.-").unwrap(), "3.1.1.-");
        assert_eq!(parse_ec_number("3.2.1.n5").unwrap(), "3.2.1.n5");
        assert_eq!(parse_ec_number("3").unwrap(), "3");
    }

    #[test]
    fn rejects_malformed_ec_numbers() {
        for bad in ["3.1.1.74.1", "3..1.1", "EC 3.1.1.74", "3.1.x.1", "3.1.1.n"] {
            assert_eq!(
                parse_ec_number(bad),
                Err(ParseError::InvalidEcNumber(bad.to_string())),
                "{bad}"
            );
        }
        assert!(matches!(
            parse_ec_number("   "),
            Err(ParseError::EmptyComponent { .. })
        ));
    }

    #[test]
    fn evidence_code_prefix_is_normalized() {
        assert_eq!(parse_evidence_code("eco:0000269").unwrap(), "ECO:0000269");
        assert_eq!(parse_evidence_code("ECO:0000314").unwrap(), "ECO:0000314");
    }

    #[test]
    fn rejects_malformed_evidence_codes() {
        for bad in ["ECO0000269", "ECO:269", "GO:0000269", "ECO:00002x9"] {
            assert!(parse_evidence_code(bad).is_err(), "{bad}");
        }
    }
}
