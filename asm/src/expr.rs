use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("The parentheses in the expression are not placed correctly")]
    InvalidBrackets,

    #[error("Invalid symbol `{0}` in expression")]
    InvalidSymbol(char),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Operator without operand")]
    MissingOperand,

    #[error("Value does not fit in 32 bits")]
    Overflow,
}

/// True if every character may appear in a constant expression.
pub fn is_expression(text: &str) -> bool {
    text.chars().all(|ch| {
        ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '%' | '(' | ')' | ' ')
    })
}

/// Evaluate an integer expression with `+ - * / % ( )` and unary signs.
///
/// Division and remainder truncate toward zero.
///
/// ```
/// use vmasm::expr::evaluate;
/// assert_eq!(evaluate("2+3*4"), Ok(14));
/// assert_eq!(evaluate("-(2+3)*2"), Ok(-10));
/// ```
pub fn evaluate(expr: &str) -> Result<i32, ExprError> {
    Solver::new().solve(expr)
}

// ----------------------------------------------------------------------------
// Operator

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    UnaryPlus,
    UnaryMinus,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    OpenParen,
}

impl Operator {
    fn binary(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '%' => Some(Operator::Mod),
            _ => None,
        }
    }

    fn unary(self) -> Operator {
        match self {
            Operator::Add => Operator::UnaryPlus,
            Operator::Sub => Operator::UnaryMinus,
            op => op,
        }
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::UnaryPlus | Operator::UnaryMinus)
    }

    pub fn priority(&self) -> u8 {
        match self {
            Operator::UnaryPlus | Operator::UnaryMinus => 3,
            Operator::Mul | Operator::Div | Operator::Mod => 2,
            Operator::Add | Operator::Sub => 1,
            Operator::OpenParen => 0,
        }
    }
}

// ----------------------------------------------------------------------------
// Solver

struct Solver {
    values: Vec<i32>,
    operations: Vec<Operator>,
    may_unary: bool,
}

impl Solver {
    fn new() -> Self {
        Solver {
            values: vec![],
            operations: vec![],
            may_unary: true,
        }
    }

    fn solve(mut self, expr: &str) -> Result<i32, ExprError> {
        if !brackets_balanced(expr) {
            return Err(ExprError::InvalidBrackets);
        }

        let mut chars = expr.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                ' ' => {}
                '(' => {
                    self.operations.push(Operator::OpenParen);
                    self.may_unary = true;
                }
                ')' => self.close_bracket()?,
                '0'..='9' => {
                    let mut end = idx + 1;
                    while let Some((_, '0'..='9')) = chars.peek() {
                        chars.next();
                        end += 1;
                    }
                    let operand = expr[idx..end]
                        .parse::<i32>()
                        .map_err(|_| ExprError::Overflow)?;
                    self.values.push(operand);
                    self.may_unary = false;
                }
                _ => match Operator::binary(ch) {
                    Some(op) => self.operation(op)?,
                    None => return Err(ExprError::InvalidSymbol(ch)),
                },
            }
        }

        while !self.operations.is_empty() {
            self.apply()?;
        }
        self.values.pop().ok_or(ExprError::MissingOperand)
    }

    fn operation(&mut self, op: Operator) -> Result<(), ExprError> {
        let op = if self.may_unary && matches!(op, Operator::Add | Operator::Sub) {
            op.unary()
        } else {
            op
        };

        // A unary operator never collapses the unary operators stacked below it.
        while let Some(top) = self.operations.last() {
            let pop = if op.is_unary() {
                top.priority() > op.priority()
            } else {
                top.priority() >= op.priority()
            };
            if !pop {
                break;
            }
            self.apply()?;
        }

        self.operations.push(op);
        self.may_unary = true;
        Ok(())
    }

    fn close_bracket(&mut self) -> Result<(), ExprError> {
        while let Some(top) = self.operations.last() {
            if *top == Operator::OpenParen {
                break;
            }
            self.apply()?;
        }
        self.operations.pop();
        self.may_unary = false;
        Ok(())
    }

    fn apply(&mut self) -> Result<(), ExprError> {
        let Some(op) = self.operations.pop() else {
            return Ok(());
        };
        match op {
            // Unmatched barrier, the bracket check rules this out.
            Operator::OpenParen => Ok(()),
            Operator::UnaryPlus => self.values.last().map(|_| ()).ok_or(ExprError::MissingOperand),
            Operator::UnaryMinus => {
                let value = self.values.pop().ok_or(ExprError::MissingOperand)?;
                self.values.push(value.checked_neg().ok_or(ExprError::Overflow)?);
                Ok(())
            }
            _ => {
                let right = self.values.pop().ok_or(ExprError::MissingOperand)?;
                let left = self.values.pop().ok_or(ExprError::MissingOperand)?;
                let result = match op {
                    Operator::Add => left.checked_add(right).ok_or(ExprError::Overflow)?,
                    Operator::Sub => left.checked_sub(right).ok_or(ExprError::Overflow)?,
                    Operator::Mul => left.checked_mul(right).ok_or(ExprError::Overflow)?,
                    Operator::Div => {
                        if right == 0 {
                            return Err(ExprError::DivisionByZero);
                        }
                        left.checked_div(right).ok_or(ExprError::Overflow)?
                    }
                    Operator::Mod => {
                        if right == 0 {
                            return Err(ExprError::DivisionByZero);
                        }
                        left.checked_rem(right).ok_or(ExprError::Overflow)?
                    }
                    _ => unreachable!("unary operators are handled above"),
                };
                self.values.push(result);
                Ok(())
            }
        }
    }
}

fn brackets_balanced(expr: &str) -> bool {
    let mut depth: usize = 0;
    for ch in expr.chars() {
        match ch {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
