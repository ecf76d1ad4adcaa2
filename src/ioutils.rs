use super::{DisplayError, Package, PackageSpecification, Product, MAX_PRODUCTS};
use itertools::Itertools;
use std::fmt;
use std::fs;
use std::str::FromStr;

// names of the tokens of an input line, used in error messages
pub const LINE_STRUCTURE: &str = "line structure";
pub const MAX_WEIGHT: &str = "max weight";
pub const MAX_PRODUCTS_TOKEN: &str = "max products";
pub const PRODUCT_NUMBER: &str = "product number";
pub const PRODUCT_WEIGHT: &str = "product weight";
pub const PRODUCT_PRICE: &str = "product price";

/// Upper bound of capacity, product weight and product price.
pub const MAX_MEASURE: f64 = 100.0;
pub const MAX_PRODUCT_NUMBER: u32 = 15;

const DELIMITERS: &[char] = &[' ', ':', '(', ')', ',', '€'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number in the input file
    pub number: usize,
    pub text: String,
}

/// Numbers the lines of `text` and drops the blank ones.
pub fn input_lines(text: &str) -> Vec<InputLine> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| InputLine {
            number: index + 1,
            text: line.to_string(),
        })
        .collect()
}

#[derive(Debug)]
pub struct InputFile(pub Vec<InputLine>);

impl FromStr for InputFile {
    type Err = DisplayError;
    fn from_str(file_name: &str) -> Result<InputFile, DisplayError> {
        let text = fs::read_to_string(file_name).map_err(|e| {
            DisplayError(format!(
                "Could not load input file: {}, because: {}",
                file_name, e
            ))
        })?;
        Ok(InputFile(input_lines(&text)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecificationError {
    Parsing {
        line: usize,
        token: &'static str,
        actual: String,
    },
    Validation {
        line: usize,
        errors: Vec<String>,
    },
}

impl SpecificationError {
    pub fn line(&self) -> usize {
        match self {
            SpecificationError::Parsing { line, .. } | SpecificationError::Validation { line, .. } => {
                *line
            }
        }
    }
}

impl fmt::Display for SpecificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificationError::Parsing {
                line,
                token,
                actual,
            } => write!(
                f,
                "Invalid '{}' found on line {} while parsing the token '{}'.",
                token, line, actual
            ),
            SpecificationError::Validation { line, errors } => write!(
                f,
                "Invalid values found on line {} :\n{}",
                line,
                errors.join("\n")
            ),
        }
    }
}

impl std::error::Error for SpecificationError {}

/// Parsed, not yet validated, content of one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpecification {
    pub line: usize,
    pub capacity: f64,
    pub products: Vec<Product>,
}

fn parse_token<K>(token: &str, name: &'static str, line: usize) -> Result<K, SpecificationError>
where
    K: FromStr,
{
    token.parse().map_err(|_| SpecificationError::Parsing {
        line,
        token: name,
        actual: token.to_string(),
    })
}

fn is_plain_token(token: &str) -> bool {
    !token.is_empty() && !token.contains(DELIMITERS)
}

// "(id,weight,€price)" -> (id, weight, price)
fn split_product(group: &str) -> Option<(&str, &str, &str)> {
    let inner = group.strip_prefix('(')?.strip_suffix(')')?;
    let mut fields = inner.split(',');
    let id = fields.next()?;
    let weight = fields.next()?;
    let price = fields.next()?.strip_prefix('€')?;
    if fields.next().is_some() || ![id, weight, price].iter().all(|x| is_plain_token(x)) {
        return None;
    }
    Some((id, weight, price))
}

/// Reads a line like `81 : (1,53.38,€45) (2,88.62,€98)`.
///
/// The structure (capacity, colon, at least one product group) is checked
/// before any value, so value errors can name the exact token.
pub fn parse_specification_line(input: &InputLine) -> Result<RawSpecification, SpecificationError> {
    let line = input.number;
    let text = input.text.trim();
    let structure_error = || SpecificationError::Parsing {
        line,
        token: LINE_STRUCTURE,
        actual: text.to_string(),
    };

    let (capacity, groups) = text.split_once(':').ok_or_else(structure_error)?;
    let capacity = capacity.trim();
    if !is_plain_token(capacity) {
        return Err(structure_error());
    }
    let groups = groups
        .split_whitespace()
        .map(|group| split_product(group).ok_or_else(structure_error))
        .collect::<Result<Vec<_>, _>>()?;
    if groups.is_empty() {
        return Err(structure_error());
    }

    let capacity = parse_token(capacity, MAX_WEIGHT, line)?;
    let products = groups
        .into_iter()
        .map(|(id, weight, price)| {
            Ok(Product {
                id: parse_token(id, PRODUCT_NUMBER, line)?,
                weight: parse_token(weight, PRODUCT_WEIGHT, line)?,
                price: parse_token(price, PRODUCT_PRICE, line)?,
            })
        })
        .collect::<Result<Vec<_>, SpecificationError>>()?;
    Ok(RawSpecification {
        line,
        capacity,
        products,
    })
}

fn is_positive_measure(value: f64) -> bool {
    value > 0.0 && value <= MAX_MEASURE
}

/// Checks every bound and reports all violations at once.
///
/// Value-equal products are collapsed before counting, the specification
/// holds a set.
pub fn validate(raw: RawSpecification) -> Result<PackageSpecification, SpecificationError> {
    let RawSpecification {
        line,
        capacity,
        products,
    } = raw;
    let products = products.into_iter().fold(Vec::new(), |mut unique, product| {
        if !unique.contains(&product) {
            unique.push(product);
        }
        unique
    });

    let invalid = |token: &str, value: &dyn fmt::Display| {
        format!(
            "On line {} the '{}' has an invalid value = '{}'.",
            line, token, value
        )
    };
    let mut errors = Vec::new();
    if !(0.0..=MAX_MEASURE).contains(&capacity) {
        errors.push(invalid(MAX_WEIGHT, &capacity));
    }
    if products.len() > MAX_PRODUCTS {
        errors.push(invalid(MAX_PRODUCTS_TOKEN, &products.len()));
    }
    for product in &products {
        if product.id > MAX_PRODUCT_NUMBER {
            errors.push(invalid(PRODUCT_NUMBER, &product.id));
        }
        if !is_positive_measure(product.weight) {
            errors.push(invalid(PRODUCT_WEIGHT, &product.weight));
        }
        if !is_positive_measure(product.price) {
            errors.push(invalid(PRODUCT_PRICE, &product.price));
        }
    }

    if errors.is_empty() {
        Ok(PackageSpecification::new(capacity, products))
    } else {
        Err(SpecificationError::Validation { line, errors })
    }
}

pub fn read_specification(input: &InputLine) -> Result<PackageSpecification, SpecificationError> {
    validate(parse_specification_line(input)?)
}

/// Sorted ids of the package joined by commas, `-` for no or an empty package.
pub struct OutputLine<'a>(pub Option<&'a Package>);

impl fmt::Display for OutputLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(package) if !package.is_empty() => {
                write!(f, "{}", package.ids().iter().join(","))
            }
            _ => f.write_str("-"),
        }
    }
}

/// Report of a line that could not be read into a specification.
pub struct LineFailure<'a>(pub &'a SpecificationError);

impl fmt::Display for LineFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {} cannot be processed because :\n{}",
            self.0.line(),
            self.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> InputLine {
        InputLine {
            number: 3,
            text: text.to_string(),
        }
    }

    fn parsing_error(text: &str) -> (&'static str, String) {
        match parse_specification_line(&line(text)) {
            Err(SpecificationError::Parsing { line, token, actual }) => {
                assert_eq!(line, 3);
                (token, actual)
            }
            other => panic!("expected a parsing error, got {:?}", other),
        }
    }

    #[test]
    fn parses_a_specification_line() {
        let raw = parse_specification_line(&line(
            "81 : (1,53.38,€45) (2,88.62,€98) (3,78.48,€3) (4,72.30,€76) (5,30.18,€9) (6,46.34,€48)",
        ))
        .unwrap();
        assert_eq!(raw.line, 3);
        assert_eq!(raw.capacity, 81.0);
        assert_eq!(raw.products.len(), 6);
        assert_eq!(raw.products[3], Product::new(4, 72.30, 76.0));
    }

    #[test]
    fn rejects_broken_structure() {
        for text in &[
            "81 (1,53.38,€45)",
            "81 : ",
            "81 : (1,53.38,45)",
            "81 : (1,53.38,€45",
            "81 : (1,53.38,€45,7)",
            " : (1,53.38,€45)",
            "81 : (1,,€45)",
        ] {
            let (token, _) = parsing_error(text);
            assert_eq!(token, LINE_STRUCTURE, "{}", text);
        }
    }

    #[test]
    fn names_the_token_that_fails_to_parse() {
        assert_eq!(
            parsing_error("abc : (1,53.38,€45)"),
            (MAX_WEIGHT, "abc".to_string())
        );
        assert_eq!(
            parsing_error("81 : (x,53.38,€45)"),
            (PRODUCT_NUMBER, "x".to_string())
        );
        assert_eq!(
            parsing_error("81 : (-1,53.38,€45)"),
            (PRODUCT_NUMBER, "-1".to_string())
        );
        assert_eq!(
            parsing_error("81 : (1,5a,€45)"),
            (PRODUCT_WEIGHT, "5a".to_string())
        );
        assert_eq!(
            parsing_error("81 : (1,53.38,€4.5.1)"),
            (PRODUCT_PRICE, "4.5.1".to_string())
        );
    }

    #[test]
    fn parsing_error_message() {
        let error = parse_specification_line(&line("81 : (x,53.38,€45)")).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid 'product number' found on line 3 while parsing the token 'x'."
        );
        assert_eq!(error.line(), 3);
    }

    #[test]
    fn validation_reports_every_violation() {
        let error = read_specification(&line("101 : (16,100.5,€0) (2,10,€10)")).unwrap_err();
        match &error {
            SpecificationError::Validation { line, errors } => {
                assert_eq!(*line, 3);
                assert_eq!(
                    errors,
                    &vec![
                        "On line 3 the 'max weight' has an invalid value = '101'.".to_string(),
                        "On line 3 the 'product number' has an invalid value = '16'.".to_string(),
                        "On line 3 the 'product weight' has an invalid value = '100.5'."
                            .to_string(),
                        "On line 3 the 'product price' has an invalid value = '0'.".to_string(),
                    ]
                );
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
        assert!(error
            .to_string()
            .starts_with("Invalid values found on line 3 :\nOn line 3 the 'max weight'"));
    }

    #[test]
    fn validation_limits_product_count() {
        let text = format!(
            "50 : {}",
            (1..=16).map(|id| format!("({},1,€1)", id)).join(" ")
        );
        match read_specification(&line(&text)).unwrap_err() {
            SpecificationError::Validation { errors, .. } => {
                assert!(errors.contains(
                    &"On line 3 the 'max products' has an invalid value = '16'.".to_string()
                ));
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_non_finite_values() {
        assert!(read_specification(&line("NaN : (1,1,€1)")).is_err());
        assert!(read_specification(&line("50 : (1,inf,€1)")).is_err());
    }

    #[test]
    fn duplicate_products_are_collapsed() {
        let specification = read_specification(&line("10 : (1,2,€3) (1,2,€3) (2,2,€3)")).unwrap();
        assert_eq!(specification.len(), 2);
        assert_eq!(specification.capacity(), 10.0);
    }

    #[test]
    fn input_lines_are_numbered_from_one() {
        let lines = input_lines("8 : (1,15.3,€34)\n\n   \n75 : (2,14.55,€74)\r\n");
        assert_eq!(
            lines,
            vec![
                InputLine {
                    number: 1,
                    text: "8 : (1,15.3,€34)".to_string()
                },
                InputLine {
                    number: 4,
                    text: "75 : (2,14.55,€74)".to_string()
                },
            ]
        );
    }

    #[test]
    fn line_failure_names_the_line() {
        let error = read_specification(&line("81 : (x,53.38,€45)")).unwrap_err();
        assert_eq!(
            LineFailure(&error).to_string(),
            "Line 3 cannot be processed because :\n\
             Invalid 'product number' found on line 3 while parsing the token 'x'."
        );
    }

    #[test]
    fn output_line() {
        let package = Package::new(vec![
            Product::new(7, 60.02, 74.0),
            Product::new(2, 14.55, 74.0),
        ]);
        assert_eq!(OutputLine(Some(&package)).to_string(), "2,7");
        assert_eq!(OutputLine(Some(&Package::empty())).to_string(), "-");
        assert_eq!(OutputLine(None).to_string(), "-");
    }
}
