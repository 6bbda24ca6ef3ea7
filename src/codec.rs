use serde::{Deserialize, Serialize};

/// Field delimiter of the persisted line format. Records are validated to
/// never contain it, so encode/decode need no escaping.
pub const FIELD_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub grade: String,
    pub marks: i64,
}

impl Record {
    /// The single normalization point for free-text fields: trim the name,
    /// trim and uppercase the grade. Applied right after decode and right
    /// before validation so storage and checks always see the same shape.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.grade = self.grade.trim().to_ascii_uppercase();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    FieldCount(usize),
    BadInt { field: &'static str, value: String },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::FieldCount(n) => {
                write!(f, "expected 5 fields, found {n}")
            }
            DecodeError::BadInt { field, value } => {
                write!(f, "{field} is not an integer: {value:?}")
            }
        }
    }
}

/// One record as one line: `id,name,age,grade,marks` plus a trailing newline.
pub fn encode(record: &Record) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}\n",
        record.id,
        record.name,
        record.age,
        record.grade,
        record.marks,
        d = FIELD_DELIMITER
    )
}

/// Split a persisted line back into a record. Exactly five fields are
/// required; integer fields must parse as base-10. No trimming happens here.
pub fn decode(line: &str) -> Result<Record, DecodeError> {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if parts.len() != 5 {
        return Err(DecodeError::FieldCount(parts.len()));
    }
    Ok(Record {
        id: parse_int("id", parts[0])?,
        name: parts[1].to_string(),
        age: parse_int("age", parts[2])?,
        grade: parts[3].to_string(),
        marks: parse_int("marks", parts[4])?,
    })
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, DecodeError> {
    raw.trim().parse::<i64>().map_err(|_| DecodeError::BadInt {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            id: 7,
            name: "Alice Wong".to_string(),
            age: 15,
            grade: "A".to_string(),
            marks: 85,
        }
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let rec = sample();
        let line = encode(&rec);
        assert_eq!(line, "7,Alice Wong,15,A,85\n");
        let back = decode(line.trim_end()).expect("decode");
        assert_eq!(back, rec);
    }

    #[test]
    fn decode_rejects_wrong_field_count() {
        assert_eq!(
            decode("1,Alice,15,A"),
            Err(DecodeError::FieldCount(4))
        );
        assert_eq!(
            decode("1,Alice,15,A,85,extra"),
            Err(DecodeError::FieldCount(6))
        );
    }

    #[test]
    fn decode_rejects_non_integer_fields() {
        assert!(matches!(
            decode("x,Alice,15,A,85"),
            Err(DecodeError::BadInt { field: "id", .. })
        ));
        assert!(matches!(
            decode("1,Alice,young,A,85"),
            Err(DecodeError::BadInt { field: "age", .. })
        ));
        assert!(matches!(
            decode("1,Alice,15,A,most"),
            Err(DecodeError::BadInt { field: "marks", .. })
        ));
    }

    #[test]
    fn normalized_trims_name_and_uppercases_grade() {
        let rec = Record {
            id: 1,
            name: "  Bo Chen ".to_string(),
            age: 12,
            grade: " b+ ".to_string(),
            marks: 70,
        }
        .normalized();
        assert_eq!(rec.name, "Bo Chen");
        assert_eq!(rec.grade, "B+");
    }
}
