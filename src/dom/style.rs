//! Inline `style` attribute parsing and editing.

use std::fmt;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

/// Ordered declarations of one `style` attribute. Property names are
/// lowercase kebab-case; values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse a `style` attribute value. Malformed declarations are dropped,
    /// as a browser would.
    pub fn parse(css: &str) -> Self {
        let mut declarations = Vec::new();
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut decl_parser = InlineDeclarationParser {
            declarations: &mut declarations,
        };
        for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
            if let Err((err, slice)) = result {
                log::trace!("skipping style declaration {slice:?}: {:?}", err.kind);
            }
        }
        let mut style = Self::default();
        for (name, value) in declarations {
            style.set(&name, &value);
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let property = css_property_name(property);
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property; an empty value removes it.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = css_property_name(property);
        let value = value.trim();
        if value.is_empty() {
            self.declarations.retain(|(name, _)| *name != property);
            return;
        }
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((property, value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) {
        self.set(property, "");
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

/// Normalize a property name: `fontWeight` and `font-weight` both become
/// `font-weight`. Custom properties (`--x`) are left alone.
pub fn css_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

struct InlineDeclarationParser<'a> {
    declarations: &'a mut Vec<(String, String)>,
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> DeclarationParser<'i> for InlineDeclarationParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let value = input.slice_from(start).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        self.declarations.push((name, value.to_string()));
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for InlineDeclarationParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = InlineStyle::parse("color: red;font-weight:bold ; margin: 0 auto");

        assert_eq!(style.len(), 3);
        assert_eq!(style.get("fontWeight"), Some("bold"));
        assert_eq!(style.get("margin"), Some("0 auto"));
        assert_eq!(style.to_string(), "color: red; font-weight: bold; margin: 0 auto;");
    }

    #[test]
    fn test_functions_and_important_survive() {
        let style = InlineStyle::parse("background: url(a;b.png) no-repeat; color: rgb(1, 2, 3) !important");

        assert_eq!(style.get("background"), Some("url(a;b.png) no-repeat"));
        assert_eq!(style.get("color"), Some("rgb(1, 2, 3) !important"));
    }

    #[test]
    fn test_malformed_declarations_dropped() {
        let style = InlineStyle::parse("color; : red; WIDTH: 1px");

        assert_eq!(style.to_string(), "width: 1px;");
    }

    #[test]
    fn test_set_and_remove() {
        let mut style = InlineStyle::parse("color: red");
        style.set("color", "blue");
        style.set("textDecoration", "underline");
        assert_eq!(style.to_string(), "color: blue; text-decoration: underline;");

        style.set("color", "");
        style.remove("text-decoration");
        assert!(style.is_empty());
    }

    #[test]
    fn test_property_names() {
        assert_eq!(css_property_name("fontWeight"), "font-weight");
        assert_eq!(css_property_name("font-weight"), "font-weight");
        assert_eq!(css_property_name("--brandColor"), "--brandColor");
    }

    mod proptests {
        use crate::dom::style::InlineStyle;
        use proptest::prelude::*;

        fn camel_case(kebab: &str) -> String {
            let mut parts = kebab.split('-');
            let mut out = parts.next().unwrap_or_default().to_string();
            for part in parts {
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                    out.extend(chars);
                }
            }
            out
        }

        proptest! {
            #[test]
            fn prop_camel_and_kebab_names_agree(
                name in "[a-z]{1,8}(-[a-z]{1,8}){0,2}",
                value in "[a-z0-9]{1,8}",
            ) {
                let mut style = InlineStyle::default();
                style.set(&camel_case(&name), &value);

                prop_assert_eq!(style.get(&name), Some(value.as_str()));
                prop_assert_eq!(style.to_string(), format!("{name}: {value};"));

                style.remove(&name);
                prop_assert!(style.is_empty());
            }
        }
    }
}
