//! CSS selector matching over the arena DOM.
//!
//! The query facade compiles selector strings once with [`compile_selector`]
//! and then matches arena elements through [`ElementRef`], our
//! `selectors::Element` implementation.

use std::fmt;

use cssparser::{Parser, ParserInput};
use html5ever::{LocalName, Namespace};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, QuirksMode, SelectorCaches};
use selectors::matching::{
    ElementSelectorFlags, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags,
};
use selectors::parser::{ParseRelative, SelectorList, SelectorParseErrorKind};
use selectors::{OpaqueElement, SelectorImpl};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};
use crate::error::{Error, Result};

/// Selector implementation for the editing DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSelectors;

/// Compiled, comma-separated selector list.
pub type Selectors = SelectorList<EditorSelectors>;

/// Identifier string type (ids, classes, attribute values).
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

impl precomputed_hash::PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        // FNV-1a
        self.0.bytes().fold(0x811c_9dc5_u32, |h, byte| {
            (h ^ byte as u32).wrapping_mul(0x0100_0193)
        })
    }
}

impl AsRef<str> for IdentStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl cssparser::ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

/// Tag or attribute name, interned by html5ever.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLocalName(pub LocalName);

impl precomputed_hash::PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl cssparser::ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<&str> for CssLocalName {
    fn from(s: &str) -> Self {
        Self(LocalName::from(s))
    }
}

/// Namespace url, interned by html5ever.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssNamespace(pub Namespace);

impl precomputed_hash::PrecomputedHash for CssNamespace {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl cssparser::ToCss for CssNamespace {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<&str> for CssNamespace {
    fn from(s: &str) -> Self {
        Self(Namespace::from(s))
    }
}

impl<'i> selectors::parser::Parser<'i> for EditorSelectors {
    type Impl = EditorSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// No pseudo-elements are supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = EditorSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

/// No user-action pseudo-classes apply to a detached editing tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = EditorSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl cssparser::ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl SelectorImpl for EditorSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = CssLocalName;
    type NamespaceUrl = CssNamespace;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = CssLocalName;
    type BorrowedNamespaceUrl = CssNamespace;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

/// Compile a selector string.
pub fn compile_selector(selector: &str) -> Result<Selectors> {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);
    SelectorList::parse(&EditorSelectors, &mut parser, ParseRelative::No)
        .map_err(|err| Error::InvalidSelector(format!("{selector}: {:?}", err.kind)))
}

/// Whether an element matches any selector of the list.
pub fn matches(dom: &ArenaDom, id: ArenaNodeId, list: &Selectors) -> bool {
    if !dom.is_element(id) {
        return false;
    }
    let element = ElementRef::new(dom, id);
    let mut caches = SelectorCaches::default();
    let mut context = MatchingContext::new(
        MatchingMode::Normal,
        None,
        &mut caches,
        QuirksMode::NoQuirks,
        NeedsSelectorFlags::No,
        MatchingForInvalidation::No,
    );
    list.slice().iter().any(|selector| {
        selectors::matching::matches_selector(selector, 0, None, &element, &mut context)
    })
}

/// Descendant elements of `root` matching the list, in document order
/// (`querySelectorAll`).
pub fn select_all(dom: &ArenaDom, root: ArenaNodeId, list: &Selectors) -> Vec<ArenaNodeId> {
    dom.descendants(root)
        .into_iter()
        .filter(|&id| matches(dom, id, list))
        .collect()
}

/// Reference to an element in the ArenaDom for selector matching.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub dom: &'a ArenaDom,
    pub id: ArenaNodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }

    fn element_sibling(&self, forward: bool) -> Option<Self> {
        let step = |id| {
            if forward {
                self.dom.next_sibling(id)
            } else {
                self.dom.prev_sibling(id)
            }
        };
        let mut current = step(self.id);
        while let Some(id) = current {
            if self.dom.is_element(id) {
                return Some(Self::new(self.dom, id));
            }
            current = step(id);
        }
        None
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.dom.element_name(self.id))
            .finish()
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = EditorSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self)
    }

    fn parent_element(&self) -> Option<Self> {
        self.dom
            .parent(self.id)
            .filter(|&parent| self.dom.is_element(parent))
            .map(|parent| Self::new(self.dom, parent))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.element_sibling(false)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.element_sibling(true)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.dom
            .children(self.id)
            .find(|&child| self.dom.is_element(child))
            .map(|child| Self::new(self.dom, child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.dom
            .element_name(self.id)
            .is_some_and(|n| n.eq_ignore_ascii_case(&name.0))
    }

    fn has_namespace(&self, ns: &CssNamespace) -> bool {
        self.dom
            .element_namespace(self.id)
            .is_some_and(|n| n == &ns.0)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.dom.element_name(self.id) == other.dom.element_name(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssNamespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        self.dom.attrs(self.id).iter().any(|attr| {
            let ns_match = match ns {
                NamespaceConstraint::Any => true,
                NamespaceConstraint::Specific(ns) => attr.name.ns == ns.0,
            };
            ns_match && attr.name.local == local_name.0 && operation.eval_str(&attr.value)
        })
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn is_link(&self) -> bool {
        self.dom.tag_is(self.id, "a") && self.dom.get_attr(self.id, "href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.dom
            .element_id(self.id)
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.dom
            .element_classes(self.id)
            .iter()
            .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.dom.children(self.id).all(|child| {
            match self.dom.get(child).map(|n| &n.data) {
                Some(ArenaNodeData::Element { .. }) => false,
                Some(ArenaNodeData::Text(t)) => t.is_empty(),
                _ => true,
            }
        })
    }

    fn is_root(&self) -> bool {
        self.dom
            .parent(self.id)
            .and_then(|parent| self.dom.get(parent))
            .is_some_and(|parent| matches!(parent.data, ArenaNodeData::Document))
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}
