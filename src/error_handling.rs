use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("unbalanced parentheses")]
    unbalanced_parens,

    #[error("number expected, found '{0}'")]
    operand_expected(String),

    #[error("'{0}' is not a valid number")]
    invalid_number(String),

    #[error("identifier, '{0}', is not defined")]
    undefined_identifier(String),

    #[error("'{0}' is not a known function")]
    unknown_function(String),

    #[error("expected '(' after '{0}'")]
    malformed_call(String),

    #[error("expression nested deeper than {0} levels")]
    too_deep(usize),

    #[error("did not expect '{0}'")]
    unexpected_token(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
