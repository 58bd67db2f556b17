//! CSS rule-set parser.
//!
//! ```text
//! stylesheet    := ws* rule_set (ws* rule_set)* ws*
//! rule_set      := selector_list '{' declaration* '}'
//! selector_list := selector (',' selector)*
//! selector      := name | '.' name | '#' name
//! declaration   := name ':' value ';'
//! ```
//!
//! Declaration values are not typed: the text between `:` and `;` is split
//! on single spaces, so runs of spaces yield empty tokens.

use mybrowser_cursor::Cursor;
use tracing::debug;

use crate::ast::{Rule, Selector, StyleRule};
use crate::CssParseError;

/// CSS rule-set parser.
pub struct CssParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> CssParser<'a> {
    /// Create a new parser positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Parse a stylesheet into its rule sets, in source order.
    pub fn parse(source: &str) -> Result<Vec<StyleRule>, CssParseError> {
        let mut parser = CssParser::new(source);
        parser.parse_stylesheet()
    }

    /// At least one rule set is required, so empty input is an error.
    fn parse_stylesheet(&mut self) -> Result<Vec<StyleRule>, CssParseError> {
        let mut rules = vec![self.parse_rule_set()?];

        self.cursor.skip_whitespace();
        while !self.cursor.is_eof() {
            rules.push(self.parse_rule_set()?);
            self.cursor.skip_whitespace();
        }

        debug!(rules = rules.len(), "parsed stylesheet");
        Ok(rules)
    }

    /// Parse `selectors { declarations }`.
    pub fn parse_rule_set(&mut self) -> Result<StyleRule, CssParseError> {
        let selectors = self.parse_selectors()?;
        let declarations = self.parse_declarations()?;
        Ok(StyleRule {
            selectors,
            declarations,
        })
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Parse a comma-separated selector list, consuming the opening `{`.
    fn parse_selectors(&mut self) -> Result<Vec<Selector>, CssParseError> {
        let mut selectors = Vec::new();

        loop {
            self.cursor.skip_whitespace();
            selectors.push(self.parse_selector()?);
            self.cursor.skip_whitespace();

            match self.cursor.peek() {
                b'{' => {
                    self.cursor.read()?;
                    return Ok(selectors);
                }
                b',' => {
                    self.cursor.read()?;
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Parse one type, class or id selector.
    pub fn parse_selector(&mut self) -> Result<Selector, CssParseError> {
        let at = self.cursor.here();
        let before = self.cursor.save();

        let make: fn(String) -> Selector = if self.cursor.match_literal(".") {
            Selector::Class
        } else if self.cursor.match_literal("#") {
            Selector::Id
        } else {
            Selector::Type
        };

        match self.cursor.scan_identifier() {
            Ok(name) => Ok(make(name.to_string())),
            Err(_) => {
                self.cursor.restore(before);
                Err(CssParseError::NoSelector { at })
            }
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Parse declarations up to and including the closing `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Rule>, CssParseError> {
        let mut declarations = Vec::new();

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.match_literal("}") {
                return Ok(declarations);
            }
            declarations.push(self.parse_declaration()?);
        }
    }

    /// Parse `key: value tokens;`.
    pub fn parse_declaration(&mut self) -> Result<Rule, CssParseError> {
        let key = self.cursor.scan_identifier()?;

        self.cursor.skip_whitespace();
        if !self.cursor.match_literal(":") {
            return Err(CssParseError::ExpectedColon {
                at: self.cursor.here(),
            });
        }
        self.cursor.skip_whitespace();

        let value = self.cursor.scan_until_byte(b';')?;
        if !self.cursor.match_literal(";") {
            return Err(CssParseError::ExpectedSemicolon {
                at: self.cursor.here(),
            });
        }

        Ok(Rule {
            key: key.to_string(),
            values: value.split(' ').map(str::to_string).collect(),
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn unexpected(&self) -> CssParseError {
        let at = self.cursor.here();
        match self.cursor.peek_char() {
            Some(found) => CssParseError::UnexpectedToken { found, at },
            None => CssParseError::UnexpectedEnd { at },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mybrowser_cursor::CursorError;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Vec<StyleRule> {
        CssParser::parse(source).unwrap()
    }

    fn parse_err(source: &str) -> CssParseError {
        CssParser::parse(source).unwrap_err()
    }

    fn rule(key: &str, values: &[&str]) -> Rule {
        Rule::new(key, values.iter().map(|v| v.to_string()).collect())
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    #[test]
    fn test_selector_kinds() {
        let cases = [
            ("#x{}", Selector::Id("x".into())),
            (".x{}", Selector::Class("x".into())),
            ("x{}", Selector::Type("x".into())),
        ];
        for (source, selector) in cases {
            assert_eq!(
                parse(source),
                vec![StyleRule {
                    selectors: vec![selector],
                    declarations: vec![],
                }],
                "{source}"
            );
        }
    }

    #[test]
    fn test_selector_list() {
        let rules = parse("div, .note ,#main{}");
        assert_eq!(
            rules[0].selectors,
            vec![
                Selector::Type("div".into()),
                Selector::Class("note".into()),
                Selector::Id("main".into()),
            ]
        );
    }

    #[test]
    fn test_selector_with_digits() {
        let rules = parse("h1, .col2 {}");
        assert_eq!(
            rules[0].selectors,
            vec![Selector::Type("h1".into()), Selector::Class("col2".into())]
        );
    }

    #[test]
    fn test_no_selector() {
        assert!(matches!(parse_err("{}"), CssParseError::NoSelector { .. }));
        assert!(matches!(parse_err(".{}"), CssParseError::NoSelector { .. }));
        assert!(matches!(parse_err("#1{}"), CssParseError::NoSelector { .. }));
    }

    #[test]
    fn test_trailing_comma() {
        assert!(matches!(parse_err("a,{}"), CssParseError::NoSelector { .. }));
    }

    #[test]
    fn test_unexpected_token_in_selector_list() {
        assert!(matches!(
            parse_err("a > b {}"),
            CssParseError::UnexpectedToken { found: '>', .. }
        ));
        assert!(matches!(
            parse_err("a b {}"),
            CssParseError::UnexpectedToken { found: 'b', .. }
        ));
    }

    #[test]
    fn test_selector_list_at_end_of_input() {
        assert!(matches!(parse_err("div"), CssParseError::UnexpectedEnd { .. }));
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    #[test]
    fn test_value_splitting() {
        assert_eq!(
            parse("d{margin: 0 10px 2px 0;}"),
            vec![StyleRule {
                selectors: vec![Selector::Type("d".into())],
                declarations: vec![rule("margin", &["0", "10px", "2px", "0"])],
            }]
        );
    }

    #[test]
    fn test_multiple_declarations() {
        let rules = parse("div{\n\tdisplay: block;\n\tcolor: red;\n}");
        assert_eq!(
            rules[0].declarations,
            vec![rule("display", &["block"]), rule("color", &["red"])]
        );
    }

    #[test]
    fn test_space_before_colon() {
        let rules = parse("p { color : blue; }");
        assert_eq!(rules[0].declarations, vec![rule("color", &["blue"])]);
    }

    #[test]
    fn test_empty_tokens_are_preserved() {
        let rules = parse("p{margin: 0  1px ;}");
        assert_eq!(
            rules[0].declarations,
            vec![rule("margin", &["0", "", "1px", ""])]
        );
    }

    #[test]
    fn test_empty_value() {
        let rules = parse("p{content:;}");
        assert_eq!(rules[0].declarations, vec![rule("content", &[""])]);
    }

    #[test]
    fn test_missing_colon() {
        assert!(matches!(
            parse_err("p{color red;}"),
            CssParseError::ExpectedColon { .. }
        ));
    }

    #[test]
    fn test_unterminated_value() {
        assert!(matches!(
            parse_err("d{margin: 0"),
            CssParseError::Cursor(CursorError::UnterminatedScan { stop: ';', .. })
        ));
    }

    #[test]
    fn test_unclosed_block() {
        assert!(matches!(
            parse_err("d{margin: 0;"),
            CssParseError::Cursor(CursorError::NotAnIdentifier { .. })
        ));
    }

    #[test]
    fn test_hyphenated_property_is_rejected() {
        assert!(matches!(
            parse_err("p{font-size: 1px;}"),
            CssParseError::ExpectedColon { .. }
        ));
    }

    // =========================================================================
    // Stylesheets
    // =========================================================================

    #[test]
    fn test_rule_order_is_kept() {
        let rules = parse("a{color: red;}\n\nb{color: blue;}\n");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selectors, vec![Selector::Type("a".into())]);
        assert_eq!(rules[1].selectors, vec![Selector::Type("b".into())]);
    }

    #[test]
    fn test_empty_stylesheet_is_rejected() {
        assert_eq!(
            parse_err(""),
            CssParseError::NoSelector {
                at: mybrowser_cursor::Location::new(0, 1, 1),
            }
        );
        assert!(matches!(
            parse_err(" \n\t"),
            CssParseError::NoSelector { at } if at.offset == 3
        ));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let rules = parse("\n  a{}\n\n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_error_location() {
        let err = parse_err("a{}\nb{x y;}");
        assert_eq!(err.location().line, 2);
        assert_eq!(err.location().column, 5);
    }
}
