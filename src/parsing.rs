use crate::error_handling::*;
use crate::evaluating::*;
use crate::nesting::*;
use crate::scanning::*;
use crate::symbols::*;

use log::{debug, trace};

/// Deepest chain of nested factors (unary minus, groups, calls) a statement
/// may contain before it is rejected.
pub const MAX_NESTING: usize = 256;

/// What a statement produced. Bindings are only written to the symbol table
/// once the statement has been fully validated.
#[derive(Debug, PartialEq)]
pub enum Statement {
    value(f64),
    assignment{name: String, value: f64},
    empty,
}

/// Recursive descent over
///
/// ```text
/// exp        → term {('+'|'-') term}
/// term       → factor {('*'|'/') factor}
/// factor     → number | 'pi' | '-' factor | '(' exp ')' | func
/// func       → funcname '(' exp ')'
/// statement  → identifier '=' exp | exp
/// ```
///
/// Values are computed while parsing; no tree is built.
pub struct Parser<'a> {
    tokens: &'a mut TokenStream,
    symbols: &'a SymbolTable,
    depth: DepthTracker,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a mut TokenStream, symbols: &'a SymbolTable) -> Self {
        Self{tokens, symbols, depth: DepthTracker::new(), nesting: 0}
    }

    pub fn depth(&self) -> DepthTracker {
        self.depth
    }

    fn starts_expression(&self, token: &str) -> bool {
        constant(token).is_some()
            || matches!(token, "(" | "+" | "-")
            || looks_numeric(token)
            || Function::is_builtin(token)
            || self.symbols.contains(token)
            || (is_identifier(token) && self.tokens.lookahead() == "(")
    }

    fn is_assignment_target(&self, token: &str) -> bool {
        is_identifier(token) && constant(token).is_none() && self.tokens.lookahead() == "="
    }

    pub fn statement(&mut self) -> Result<Statement> {
        let token = self.tokens.current().to_string();
        trace!("statement at '{}'", token);

        if self.is_assignment_target(&token) {
            self.tokens.advance();
            self.tokens.advance();
            let value = self.expression()?;
            return Ok(Statement::assignment{name: token, value});
        }

        if self.starts_expression(&token) {
            return Ok(Statement::value(self.expression()?));
        }

        Ok(Statement::empty)
    }

    fn expression(&mut self) -> Result<f64> {
        use BinaryOperator::*;

        let mut value = self.term()?;
        loop {
            let token = self.tokens.current();
            if token == ")" {
                self.tokens.advance();
                self.depth.close()?;
                trace!("closed group, depth {}", self.depth.depth());
                break;
            }
            match token.parse::<BinaryOperator>() {
                Ok(operator @ (addition | subtraction)) => {
                    self.tokens.advance();
                    let right = self.term()?;
                    value = operator.call(value, right);
                },
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64> {
        use BinaryOperator::*;

        let mut value = self.factor()?;
        loop {
            match self.tokens.current().parse::<BinaryOperator>() {
                Ok(operator @ (multiplication | division)) => {
                    self.tokens.advance();
                    let right = self.factor()?;
                    value = operator.call(value, right);
                },
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64> {
        if self.nesting == MAX_NESTING {
            return Err(CalcError::too_deep(MAX_NESTING));
        }
        self.nesting += 1;
        let value = self.bare_factor();
        self.nesting -= 1;
        value
    }

    fn bare_factor(&mut self) -> Result<f64> {
        let token = self.tokens.current().to_string();
        trace!("factor at '{}'", token);

        if let Some(value) = constant(&token) {
            self.tokens.advance();
            return Ok(value);
        }

        match token.as_str() {
            "-" => {
                self.tokens.advance();
                Ok(-self.factor()?)
            },
            "(" => {
                self.tokens.advance();
                self.depth.open();
                self.expression()
            },
            _ if is_symbolic(&token) => Err(CalcError::operand_expected(token)),
            _ if looks_numeric(&token) => {
                let value = token.parse::<f64>()
                    .map_err(|_| CalcError::invalid_number(token.clone()))?;
                self.tokens.advance();
                Ok(value)
            },
            // a binding shadows a function of the same name
            _ if self.symbols.contains(&token) => {
                self.tokens.advance();
                self.symbols.get(&token)
            },
            _ if Function::is_builtin(&token) || self.tokens.lookahead() == "(" => {
                self.tokens.advance();
                self.function(&token)
            },
            _ => Err(CalcError::undefined_identifier(token)),
        }
    }

    fn function(&mut self, name: &str) -> Result<f64> {
        if self.tokens.current() != "(" {
            return Err(CalcError::malformed_call(name.into()));
        }
        self.tokens.advance();
        self.depth.open();

        let argument = self.expression()?;
        let function: Function = name.parse()?;
        Ok(function.call(argument))
    }
}

/// Parses and evaluates one tokenized statement.
///
/// Returns the value of an expression, or `None` for an assignment or an
/// empty line. An assignment is committed to `symbols` only on success.
pub fn evaluate_statement(tokens: &mut TokenStream, symbols: &mut SymbolTable) -> Result<Option<f64>> {
    let (statement, depth) = {
        let mut parser = Parser::new(tokens, symbols);
        let statement = parser.statement()?;
        (statement, parser.depth())
    };

    if !depth.is_balanced() {
        return Err(CalcError::unbalanced_parens);
    }

    if !tokens.at_end() {
        let token = tokens.current();
        return Err(if is_identifier(token) && !symbols.contains(token) {
            CalcError::undefined_identifier(token.into())
        } else {
            CalcError::unexpected_token(token.into())
        });
    }

    match statement {
        Statement::value(value) => Ok(Some(value)),
        Statement::assignment{name, value} => {
            debug!("binding {} = {}", name, value);
            symbols.set(&name, value);
            Ok(None)
        },
        Statement::empty => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(symbols: &mut SymbolTable, line: &str) -> Result<Option<f64>> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut tokens = tokenize(line);
        evaluate_statement(&mut tokens, symbols)
    }

    fn value(line: &str) -> f64 {
        eval(&mut SymbolTable::new(), line).unwrap().unwrap()
    }

    fn error(line: &str) -> CalcError {
        eval(&mut SymbolTable::new(), line).unwrap_err()
    }

    fn close_to(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-12
    }

    #[test]
    fn precedence() {
        assert_eq!(value("2+3*4"), 14.0);
        assert_eq!(value("(2+3)*4"), 20.0);
        assert_eq!(value("2*3+4*5"), 26.0);
        assert_eq!(value("1 + 6 / 3"), 3.0);
    }

    #[test]
    fn left_associative() {
        assert_eq!(value("10-4-3"), 3.0);
        assert_eq!(value("8/4/2"), 1.0);
        assert_eq!(value("2.5*4"), 10.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(value("-3+4"), 1.0);
        assert_eq!(value("--3"), 3.0);
        assert_eq!(value("-(-3)"), 3.0);
        assert_eq!(value("2*-3"), -6.0);
        assert_eq!(value("- - -1"), -1.0);
    }

    #[test]
    fn constants_and_functions() {
        assert_eq!(value("pi"), std::f64::consts::PI);
        assert_eq!(value("sqrt(16)"), 4.0);
        assert_eq!(value("abs(-5)"), 5.0);
        assert_eq!(value("2*sqrt(9)+1"), 7.0);
        assert_eq!(value("abs(sqrt(16)-10)"), 6.0);
        assert!(close_to(value("sin(pi/2)"), 1.0));
        assert!(close_to(value("cos(pi)"), -1.0));
        assert!(close_to(value("exp(1)"), std::f64::consts::E));
        assert!(close_to(value("tan(0)"), 0.0));
    }

    #[test]
    fn nested_groups() {
        assert_eq!(value("((1+2))"), 3.0);
        assert_eq!(value("(1+(2*3))*2"), 14.0);
        assert_eq!(value("((2)*(3))+1"), 7.0);
    }

    #[test]
    fn assignment_round_trip() {
        let mut symbols = SymbolTable::new();
        assert_eq!(eval(&mut symbols, "x=5"), Ok(None));
        assert_eq!(eval(&mut symbols, "x*2"), Ok(Some(10.0)));
        assert_eq!(eval(&mut symbols, "x=x+1"), Ok(None));
        assert_eq!(eval(&mut symbols, "x"), Ok(Some(6.0)));
        assert_eq!(symbols.get("x"), Ok(6.0));
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(error("(1+2"), CalcError::unbalanced_parens);
        assert_eq!(error("1+2)"), CalcError::unbalanced_parens);
        assert_eq!(error("(1+2))"), CalcError::unbalanced_parens);
        assert_eq!(error("sqrt(4"), CalcError::unbalanced_parens);
    }

    #[test]
    fn undefined_identifiers() {
        assert_eq!(error("y*2"), CalcError::undefined_identifier("y".into()));
        assert_eq!(error("y"), CalcError::undefined_identifier("y".into()));
        assert_eq!(error("1+y"), CalcError::undefined_identifier("y".into()));
    }

    #[test]
    fn function_errors() {
        assert_eq!(error("foo(2)"), CalcError::unknown_function("foo".into()));
        assert_eq!(error("sqrt 4"), CalcError::malformed_call("sqrt".into()));
    }

    #[test]
    fn operand_errors() {
        assert_eq!(error("2*"), CalcError::operand_expected(END_MARKER.into()));
        assert_eq!(error("()"), CalcError::operand_expected(")".into()));
        assert_eq!(error("+3"), CalcError::operand_expected("+".into()));
        assert_eq!(error("1.2.3"), CalcError::invalid_number("1.2.3".into()));
    }

    #[test]
    fn trailing_tokens() {
        assert_eq!(error("3 4"), CalcError::unexpected_token("4".into()));
        assert_eq!(error("= 5"), CalcError::unexpected_token("=".into()));
        assert_eq!(error("pi = 3"), CalcError::unexpected_token("=".into()));
    }

    #[test]
    fn failed_statement_keeps_symbols() {
        let mut symbols = SymbolTable::new();
        eval(&mut symbols, "x = 1").unwrap();
        assert_eq!(eval(&mut symbols, "x = (2"), Err(CalcError::unbalanced_parens));
        assert_eq!(eval(&mut symbols, "z = y + 1"), Err(CalcError::undefined_identifier("y".into())));
        assert_eq!(symbols.get("x"), Ok(1.0));
        assert!(!symbols.contains("z"));
        assert_eq!(symbols.sorted().len(), 1);
    }

    #[test]
    fn binding_shadows_function() {
        let mut symbols = SymbolTable::new();
        assert_eq!(eval(&mut symbols, "sin = 2"), Ok(None));
        assert_eq!(eval(&mut symbols, "sin*3"), Ok(Some(6.0)));
        assert_eq!(eval(&mut symbols, "sin(0)"), Err(CalcError::unexpected_token("(".into())));
    }

    #[test]
    fn reading_does_not_mutate() {
        let mut symbols = SymbolTable::new();
        eval(&mut symbols, "a = 3").unwrap();
        let first = eval(&mut symbols, "a*2+1");
        let second = eval(&mut symbols, "a*2+1");
        assert_eq!(first, Ok(Some(7.0)));
        assert_eq!(first, second);
        assert_eq!(symbols.sorted().len(), 1);
        assert_eq!(symbols.get("a"), Ok(3.0));
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert_eq!(value("1/0"), f64::INFINITY);
        assert!(value("0/0").is_nan());
    }

    #[test]
    fn nesting_limit() {
        let minuses = format!("{}1", "-".repeat(200_000));
        assert_eq!(error(&minuses), CalcError::too_deep(MAX_NESTING));

        let groups = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(error(&groups), CalcError::too_deep(MAX_NESTING));

        let calls = format!("{}1{}", "abs(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(error(&calls), CalcError::too_deep(MAX_NESTING));
    }

    #[test]
    fn nesting_within_limit() {
        let groups = format!("{}2{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(value(&groups), 2.0);
        assert_eq!(value(&format!("{}1", "-".repeat(100))), 1.0);
    }

    #[test]
    fn typed_dollar_is_rejected() {
        assert_eq!(error("2 $"), CalcError::unexpected_token("$".into()));
        assert_eq!(error("2 + $"), CalcError::operand_expected("$".into()));
    }

    #[test]
    fn empty_statement() {
        assert_eq!(eval(&mut SymbolTable::new(), ""), Ok(None));
    }

    #[test]
    fn statement_rules() {
        let symbols = SymbolTable::new();

        let mut tokens = tokenize("v = 2*3");
        let mut parser = Parser::new(&mut tokens, &symbols);
        assert_eq!(parser.statement(), Ok(Statement::assignment{name: "v".into(), value: 6.0}));

        let mut tokens = tokenize("* 2");
        let mut parser = Parser::new(&mut tokens, &symbols);
        assert_eq!(parser.statement(), Ok(Statement::empty));
        assert_eq!(tokens.position(), 0);
    }
}
