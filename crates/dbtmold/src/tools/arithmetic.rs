//! Deterministic arithmetic tools.
//!
//! Each operation is a pure function over `f64` or `i64` that returns a
//! validation [`ToolError`] when its input falls outside the operation's
//! domain. The `*_tool()` constructors wrap them as [`FnTool`]s with typed,
//! schema-derived arguments; [`ToolSet::with_arithmetic_tools`] registers
//! the whole catalogue.

use super::core::{FnTool, ToolResult, ToolSet, ToolValue};
use super::spec::ToolSpec;
use crate::error::ToolError;
use schemars::JsonSchema;
use serde::Deserialize;

/// Largest `n` whose factorial fits in an `i64`.
pub const MAX_FACTORIAL_INPUT: u64 = 20;

// ── Operations ─────────────────────────────────────────────────────

pub fn sum(numbers: &[f64]) -> Result<f64, ToolError> {
    non_empty(numbers, "sum")?;
    Ok(numbers.iter().sum())
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(numbers: &[f64]) -> Result<f64, ToolError> {
    non_empty(numbers, "multiply")?;
    Ok(numbers.iter().product())
}

pub fn divide(a: f64, b: f64) -> Result<f64, ToolError> {
    if b == 0.0 {
        return Err(ToolError::validation("cannot divide by zero"));
    }
    Ok(a / b)
}

/// Real exponentiation. Results outside the reals (e.g. a fractional power of
/// a negative base) come back as NaN rather than an error.
pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

pub fn square_root(x: f64) -> Result<f64, ToolError> {
    if x < 0.0 {
        return Err(ToolError::validation(format!(
            "cannot take the square root of a negative number ({x})"
        )));
    }
    Ok(x.sqrt())
}

/// `percent` percent of `value`.
pub fn percentage(value: f64, percent: f64) -> f64 {
    value * percent / 100.0
}

pub fn average(numbers: &[f64]) -> Result<f64, ToolError> {
    non_empty(numbers, "average")?;
    Ok(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Factorial of a non-negative integer given as a JSON number.
pub fn factorial(n: f64) -> Result<i64, ToolError> {
    if n < 0.0 {
        return Err(ToolError::validation("factorial is undefined for negative numbers"));
    }
    if n.fract() != 0.0 {
        return Err(ToolError::validation("factorial requires an integer"));
    }
    if n > MAX_FACTORIAL_INPUT as f64 {
        return Err(ToolError::validation(format!(
            "factorial input exceeds the 64-bit integer range (max input {MAX_FACTORIAL_INPUT})"
        )));
    }
    let product: u64 = (1..=n as u64).product();
    to_i64(product, "factorial")
}

/// Greatest common divisor, always non-negative. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> Result<i64, ToolError> {
    to_i64(gcd_unsigned(a.unsigned_abs(), b.unsigned_abs()), "gcd")
}

/// Least common multiple. Zero when either input is zero, otherwise
/// `|a * b| / gcd(a, b)`.
pub fn lcm(a: i64, b: i64) -> Result<i64, ToolError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    let (a, b) = (a.unsigned_abs(), b.unsigned_abs());
    let lcm = (a / gcd_unsigned(a, b))
        .checked_mul(b)
        .ok_or_else(|| ToolError::validation("lcm exceeds the 64-bit integer range"))?;
    to_i64(lcm, "lcm")
}

fn gcd_unsigned(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn to_i64(value: u64, operation: &str) -> Result<i64, ToolError> {
    i64::try_from(value).map_err(|_| {
        ToolError::validation(format!("{operation} exceeds the 64-bit integer range"))
    })
}

fn non_empty(numbers: &[f64], operation: &str) -> Result<(), ToolError> {
    if numbers.is_empty() {
        Err(ToolError::validation(format!(
            "{operation} requires at least one number"
        )))
    } else {
        Ok(())
    }
}

// ── Arguments ──────────────────────────────────────────────────────

/// Arguments for list operations.
#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NumbersArgs {
    /// The numbers to combine. Must not be empty.
    pub numbers: Vec<f64>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PairArgs {
    /// Left operand.
    pub a: f64,
    /// Right operand.
    pub b: f64,
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PowerArgs {
    pub base: f64,
    pub exponent: f64,
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SquareRootArgs {
    /// A non-negative number.
    pub x: f64,
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PercentageArgs {
    /// The whole amount.
    pub value: f64,
    /// Percentage of `value` to take (25 means 25%).
    pub percent: f64,
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FactorialArgs {
    /// A non-negative integer.
    pub n: f64,
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct IntegerPairArgs {
    pub a: i64,
    pub b: i64,
}

// ── Tools ──────────────────────────────────────────────────────────

fn number(result: Result<f64, ToolError>) -> ToolResult {
    result.map(ToolValue::Number)
}

fn integer(result: Result<i64, ToolError>) -> ToolResult {
    result.map(ToolValue::Integer)
}

pub fn sum_tool() -> FnTool {
    let def = ToolSpec::builder("sum")
        .purpose("Add a list of numbers")
        .when_to_use("When you need the total of one or more numbers")
        .fails_when("the list is empty")
        .parameters_for::<NumbersArgs>()
        .example("sum(numbers=[1, 2, 3.5])", "6.5")
        .to_tool_def();
    FnTool::pure(def, |args: NumbersArgs| number(sum(&args.numbers)))
}

pub fn subtract_tool() -> FnTool {
    let def = ToolSpec::builder("subtract")
        .purpose("Subtract b from a")
        .when_to_use("When you need the difference between two numbers")
        .parameters_for::<PairArgs>()
        .example("subtract(a=10, b=4)", "6")
        .to_tool_def();
    FnTool::pure(def, |args: PairArgs| {
        Ok(ToolValue::Number(subtract(args.a, args.b)))
    })
}

pub fn multiply_tool() -> FnTool {
    let def = ToolSpec::builder("multiply")
        .purpose("Multiply a list of numbers")
        .when_to_use("When you need the product of one or more numbers")
        .fails_when("the list is empty")
        .parameters_for::<NumbersArgs>()
        .example("multiply(numbers=[2, 3, 4])", "24")
        .to_tool_def();
    FnTool::pure(def, |args: NumbersArgs| number(multiply(&args.numbers)))
}

pub fn divide_tool() -> FnTool {
    let def = ToolSpec::builder("divide")
        .purpose("Divide a by b")
        .when_to_use("When you need a quotient")
        .fails_when("b is 0")
        .parameters_for::<PairArgs>()
        .example("divide(a=9, b=3)", "3")
        .to_tool_def();
    FnTool::pure(def, |args: PairArgs| number(divide(args.a, args.b)))
}

pub fn power_tool() -> FnTool {
    let def = ToolSpec::builder("power")
        .purpose("Raise base to the power of exponent")
        .when_to_use("When you need exponentiation, including fractional or negative exponents")
        .parameters_for::<PowerArgs>()
        .example("power(base=2, exponent=10)", "1024")
        .to_tool_def();
    FnTool::pure(def, |args: PowerArgs| {
        Ok(ToolValue::Number(power(args.base, args.exponent)))
    })
}

pub fn square_root_tool() -> FnTool {
    let def = ToolSpec::builder("square_root")
        .purpose("Take the square root of x")
        .when_to_use("When you need a square root; use power for other roots")
        .fails_when("x is negative")
        .parameters_for::<SquareRootArgs>()
        .example("square_root(x=16)", "4")
        .to_tool_def();
    FnTool::pure(def, |args: SquareRootArgs| number(square_root(args.x)))
}

pub fn percentage_tool() -> FnTool {
    let def = ToolSpec::builder("percentage")
        .purpose("Compute percent percent of value")
        .when_to_use("When you need a share of an amount, e.g. 25% of 200")
        .parameters_for::<PercentageArgs>()
        .example("percentage(value=200, percent=25)", "50")
        .to_tool_def();
    FnTool::pure(def, |args: PercentageArgs| {
        Ok(ToolValue::Number(percentage(args.value, args.percent)))
    })
}

pub fn average_tool() -> FnTool {
    let def = ToolSpec::builder("average")
        .purpose("Compute the arithmetic mean of a list of numbers")
        .when_to_use("When you need the mean; use sum for a total")
        .fails_when("the list is empty")
        .parameters_for::<NumbersArgs>()
        .example("average(numbers=[2, 4, 6])", "4")
        .to_tool_def();
    FnTool::pure(def, |args: NumbersArgs| number(average(&args.numbers)))
}

pub fn factorial_tool() -> FnTool {
    let def = ToolSpec::builder("factorial")
        .purpose("Compute n!")
        .when_to_use("When you need the factorial of a whole number")
        .fails_when("n is negative, not a whole number, or greater than 20")
        .parameters_for::<FactorialArgs>()
        .example("factorial(n=5)", "120")
        .output_format("An integer")
        .to_tool_def();
    FnTool::pure(def, |args: FactorialArgs| integer(factorial(args.n)))
}

pub fn gcd_tool() -> FnTool {
    let def = ToolSpec::builder("gcd")
        .purpose("Compute the greatest common divisor of two integers")
        .when_to_use("When you need the largest integer dividing both a and b")
        .parameters_for::<IntegerPairArgs>()
        .example("gcd(a=12, b=18)", "6")
        .example("gcd(a=0, b=0)", "0")
        .output_format("A non-negative integer")
        .to_tool_def();
    FnTool::pure(def, |args: IntegerPairArgs| integer(gcd(args.a, args.b)))
}

pub fn lcm_tool() -> FnTool {
    let def = ToolSpec::builder("lcm")
        .purpose("Compute the least common multiple of two integers")
        .when_to_use("When you need the smallest positive multiple shared by a and b")
        .parameters_for::<IntegerPairArgs>()
        .example("lcm(a=4, b=6)", "12")
        .example("lcm(a=0, b=7)", "0")
        .output_format("A non-negative integer")
        .to_tool_def();
    FnTool::pure(def, |args: IntegerPairArgs| integer(lcm(args.a, args.b)))
}

/// The complete arithmetic catalogue.
pub fn arithmetic_tools() -> Vec<FnTool> {
    vec![
        sum_tool(),
        subtract_tool(),
        multiply_tool(),
        divide_tool(),
        power_tool(),
        square_root_tool(),
        percentage_tool(),
        average_tool(),
        factorial_tool(),
        gcd_tool(),
        lcm_tool(),
    ]
}

impl ToolSet {
    /// Register every arithmetic tool.
    pub fn with_arithmetic_tools(mut self) -> Self {
        for tool in arithmetic_tools() {
            self.register(tool);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::tools::Tool;

    fn is_validation<T: std::fmt::Debug>(result: Result<T, ToolError>) -> bool {
        matches!(result, Err(ToolError { kind: ErrorKind::Validation, .. }))
    }

    #[test]
    fn list_operations_reject_empty_input() {
        assert!(is_validation(sum(&[])));
        assert!(is_validation(multiply(&[])));
        assert!(is_validation(average(&[])));
    }

    #[test]
    fn list_operations() {
        assert_eq!(sum(&[1.0, 2.0, 3.5]).unwrap(), 6.5);
        assert_eq!(multiply(&[2.0, 3.0, 4.0]).unwrap(), 24.0);
        assert_eq!(average(&[2.0, 4.0, 6.0]).unwrap(), 4.0);
        assert_eq!(sum(&[-1.0]).unwrap(), -1.0);
    }

    #[test]
    fn divide_by_zero_fails_for_any_dividend() {
        for a in [0.0, 1.0, -7.5, 1e300] {
            assert!(is_validation(divide(a, 0.0)));
            assert!(is_validation(divide(a, -0.0)));
        }
        assert_eq!(divide(9.0, 3.0).unwrap(), 3.0);
    }

    #[test]
    fn square_root_domain() {
        assert!(is_validation(square_root(-1.0)));
        assert_eq!(square_root(16.0).unwrap(), 4.0);
        assert_eq!(square_root(0.0).unwrap(), 0.0);
    }

    #[test]
    fn scalar_operations() {
        assert_eq!(power(2.0, 10.0), 1024.0);
        assert_eq!(power(4.0, 0.5), 2.0);
        assert!(power(-8.0, 1.0 / 3.0).is_nan());
        assert_eq!(percentage(200.0, 25.0), 50.0);
        assert_eq!(subtract(10.0, 4.0), 6.0);
    }

    #[test]
    fn factorial_domain() {
        assert_eq!(factorial(5.0).unwrap(), 120);
        assert_eq!(factorial(0.0).unwrap(), 1);
        assert_eq!(factorial(20.0).unwrap(), 2_432_902_008_176_640_000);
        assert!(is_validation(factorial(-1.0)));
        assert!(is_validation(factorial(2.5)));
        assert!(is_validation(factorial(21.0)));
    }

    #[test]
    fn factorial_errors_stay_short_for_extreme_inputs() {
        for n in [1e300, -1e300, 1e-300, f64::MAX] {
            let err = factorial(n).unwrap_err();
            assert!(err.message.len() < 100, "{n:e}: {}", err.message);
        }
        assert_eq!(
            factorial(1e300).unwrap_err().message,
            "factorial input exceeds the 64-bit integer range (max input 20)"
        );
    }

    #[test]
    fn gcd_and_lcm_conventions() {
        assert_eq!(gcd(0, 0).unwrap(), 0);
        assert_eq!(gcd(12, 18).unwrap(), 6);
        assert_eq!(gcd(-12, 18).unwrap(), 6);
        assert_eq!(gcd(0, 9).unwrap(), 9);
        assert_eq!(lcm(0, 7).unwrap(), 0);
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(-4, 6).unwrap(), 12);
        assert!(is_validation(gcd(i64::MIN, 0)));
        assert!(is_validation(lcm(i64::MAX, i64::MAX - 1)));
    }

    #[test]
    fn catalogue_names() {
        let set = ToolSet::new().with_arithmetic_tools();
        assert_eq!(
            set.names(),
            vec![
                "average",
                "divide",
                "factorial",
                "gcd",
                "lcm",
                "multiply",
                "percentage",
                "power",
                "square_root",
                "subtract",
                "sum",
            ]
        );
        assert!(set.names().iter().all(|n| !set.is_terminal(n)));
    }

    #[test]
    fn descriptions_mention_failure_conditions() {
        let def = divide_tool().definition();
        assert!(def.function.description.contains("Fails when: b is 0"));
        assert_eq!(def.function.parameters["type"], "object");
    }

    #[tokio::test]
    async fn dispatch_through_toolset() {
        let set = ToolSet::new().with_arithmetic_tools();
        assert_eq!(
            set.dispatch("power", r#"{"base": 2, "exponent": 10}"#).await,
            Ok(ToolValue::Number(1024.0))
        );
        assert_eq!(
            set.dispatch("percentage", r#"{"value": 200, "percent": 25}"#)
                .await,
            Ok(ToolValue::Number(50.0))
        );
        assert_eq!(
            set.dispatch("lcm", r#"{"a": 4, "b": 6}"#).await,
            Ok(ToolValue::Integer(12))
        );
        assert_eq!(
            set.dispatch("factorial", r#"{"n": 5}"#).await,
            Ok(ToolValue::Integer(120))
        );
    }

    #[tokio::test]
    async fn dispatch_reports_domain_errors() {
        let set = ToolSet::new().with_arithmetic_tools();
        for (name, args) in [
            ("divide", r#"{"a": 1, "b": 0}"#),
            ("square_root", r#"{"x": -1}"#),
            ("factorial", r#"{"n": -1}"#),
            ("factorial", r#"{"n": 2.5}"#),
            ("average", r#"{"numbers": []}"#),
            ("sum", r#"{"numbers": []}"#),
        ] {
            let err = set.dispatch(name, args).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{name}({args})");
        }
    }

    #[tokio::test]
    async fn dispatch_rejects_wrong_parameter_names() {
        let set = ToolSet::new().with_arithmetic_tools();
        let err = set
            .dispatch("divide", r#"{"x": 1, "y": 2}"#)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("divide"));
    }
}
