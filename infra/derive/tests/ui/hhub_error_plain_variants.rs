use hhub_derive::hhub_error;

#[hhub_error]
pub enum RuleError {
    #[error("Value must be positive")]
    Negative { value: i64 },
}

fn main() {
    let err = RuleError::Negative { value: -1 };
    assert_eq!(err.to_string(), "Value must be positive");
}
