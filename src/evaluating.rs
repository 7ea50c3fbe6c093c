use crate::error_handling::*;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
}

impl BinaryOperator {
    pub fn call(&self, left: f64, right: f64) -> f64 {
        use BinaryOperator::*;

        match self {
            addition => left + right,
            subtraction => left - right,
            multiplication => left * right,
            // dividing by zero yields inf/NaN, left to IEEE
            division => left / right,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

impl FromStr for BinaryOperator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(multiplication),
            "/" => Ok(division),
            _ => Err(InvalidOperator),
        }
    }
}

/// Built-in unary functions. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    sin,
    cos,
    tan,
    exp,
    sqrt,
    abs,
}

pub const FUNCTION_NAMES: [&str; 6] = ["sin", "cos", "tan", "exp", "sqrt", "abs"];

impl Function {
    pub fn call(&self, argument: f64) -> f64 {
        use Function::*;
        match self {
            sin => argument.sin(),
            cos => argument.cos(),
            tan => argument.tan(),
            exp => argument.exp(),
            sqrt => argument.sqrt(),
            abs => argument.abs(),
        }
    }

    pub fn is_builtin(name: &str) -> bool {
        FUNCTION_NAMES.contains(&name)
    }
}

impl FromStr for Function {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use Function::*;
        match s {
            "sin" => Ok(sin),
            "cos" => Ok(cos),
            "tan" => Ok(tan),
            "exp" => Ok(exp),
            "sqrt" => Ok(sqrt),
            "abs" => Ok(abs),
            _ => Err(CalcError::unknown_function(s.into())),
        }
    }
}

pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        _ => None,
    }
}
