//! The layout grammar validator.
//!
//! A push-down automaton over the document event stream. The current
//! grammar context is the top of an explicit [`Context`] stack; each
//! start event is interpreted by the top context's entry transition and
//! each end event by its exit transition. Unrecognized subtrees are
//! skipped with a depth counter while still being forwarded downstream.
//!
//! The validator owns an [`EventSink`] and forwards every event to it
//! unchanged after performing its checks, so the serializer receives the
//! exact stream that was validated. All registries and scopes live in a
//! single [`DocumentState`] threaded through the transitions, keeping
//! individual checks testable without a full document pass.

use std::io;

use log::debug;

use easel_core::color;
use easel_core::event::{Attributes, EventSink};
use easel_core::geometry::{self, BoundsIssue};
use easel_core::location::Location;
use easel_core::numeric;
use easel_core::tag::{self, TagIssue};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode, LayoutError};
use crate::registry::{self, Registry};
use crate::scope::{FlagStack, ScopeStack};

/// The required root element name.
pub const ROOT_ELEMENT: &str = "mamelayout";

/// Leaf shape tags legal inside an `element` body.
pub const SHAPES: [&str; 8] = [
    "disk",
    "led14seg",
    "led14segsc",
    "led16seg",
    "led16segsc",
    "led7seg",
    "led8seg_gts1",
    "rect",
];

/// Drawable object tags legal inside a `group` or `view` body.
pub const OBJECTS: [&str; 5] = ["backdrop", "bezel", "cpanel", "marquee", "overlay"];

/// A grammar context. The top of the context stack selects how the next
/// start/end event is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Outside the root element.
    Root,
    /// Inside `mamelayout`.
    Layout,
    /// Inside an `element` definition.
    Element,
    /// Inside a shape or `text` body.
    Shape,
    /// Inside a `group` or `view` body.
    GroupView,
    /// Inside a screen, group reference, or drawable object body.
    Object,
}

/// Registries and scopes for one document pass.
#[derive(Debug, Default)]
struct DocumentState {
    elements: Registry,
    groups: Registry,
    views: Registry,
    referenced_elements: Registry,
    referenced_groups: Registry,
    /// A generated element name was defined somewhere in the document,
    /// disabling the element reference sweep entirely: template-expanded
    /// names cannot be statically resolved.
    generated_element_names: bool,
    /// Same, for group names.
    generated_group_names: bool,
    scopes: ScopeStack,
    /// One counter per enclosing layout/group/view context; the top
    /// counts currently-open `repeat` elements in that context.
    repeat_depth: Vec<u32>,
    have_bounds: FlagStack,
    have_color: FlagStack,
}

impl DocumentState {
    fn in_repeat(&self) -> bool {
        self.repeat_depth.last().is_some_and(|depth| *depth > 0)
    }
}

/// The layout grammar validator.
///
/// Create one per document, feed it the event stream, then call
/// [`finish`](Validator::finish) to recover the sink and the accumulated
/// diagnostics.
pub struct Validator<S> {
    sink: S,
    contexts: Vec<Context>,
    ignored_depth: u32,
    state: DocumentState,
    diagnostics: DiagnosticCollector,
}

impl<S: EventSink> Validator<S> {
    /// Create a validator forwarding events to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            contexts: vec![Context::Root],
            ignored_depth: 0,
            state: DocumentState::default(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Deliver the document-start event.
    pub fn start_document(&mut self) -> io::Result<()> {
        self.sink.start_document()
    }

    /// Deliver the document-end event.
    pub fn end_document(&mut self) -> io::Result<()> {
        self.sink.end_document()
    }

    /// Deliver a start-element event.
    pub fn start_element(
        &mut self,
        name: &str,
        attrs: &Attributes,
        location: Location,
    ) -> io::Result<()> {
        if self.ignored_depth > 0 {
            self.ignored_depth += 1;
        } else {
            match self.current_context() {
                Context::Root => self.enter_root(name, attrs, location),
                Context::Layout => self.enter_layout(name, attrs, location),
                Context::Element => self.enter_element(name, attrs, location),
                Context::Shape => self.enter_shape(name, attrs, location),
                Context::GroupView => self.enter_group_view(name, attrs, location),
                Context::Object => self.enter_object(name, attrs, location),
            }
        }
        self.sink.start_element(name, attrs)
    }

    /// Deliver an end-element event.
    pub fn end_element(&mut self, name: &str) -> io::Result<()> {
        if self.ignored_depth > 0 {
            self.ignored_depth -= 1;
        } else {
            match self.current_context() {
                // The root context has no element of its own to close.
                Context::Root => {}
                Context::Layout => self.exit_layout(),
                Context::Element => self.exit_element(),
                Context::Shape => self.exit_shape(),
                Context::GroupView => self.exit_group_view(),
                Context::Object => self.exit_object(),
            }
        }
        self.sink.end_element(name)
    }

    /// Deliver character data. Not interpreted by the grammar.
    pub fn characters(&mut self, text: &str) -> io::Result<()> {
        self.sink.characters(text)
    }

    /// Finish the pass, yielding the sink and the validation outcome.
    pub fn finish(self) -> (S, Result<(), LayoutError>) {
        let result = self.diagnostics.finish();
        if let Err(err) = &result {
            debug!(
                errors = err.error_count(),
                diagnostics = err.diagnostics().len();
                "validation failed"
            );
        }
        (self.sink, result)
    }

    /// Number of error diagnostics recorded so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    fn current_context(&self) -> Context {
        *self
            .contexts
            .last()
            .expect("the root context is never popped")
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.emit(diagnostic);
    }

    // =========================================================================
    // Entry transitions
    // =========================================================================

    fn enter_root(&mut self, name: &str, attrs: &Attributes, location: Location) {
        if name != ROOT_ELEMENT {
            self.report(
                Diagnostic::error(format!(
                    "expected root element `{ROOT_ELEMENT}` but found `{name}`"
                ))
                .with_code(ErrorCode::E001)
                .with_label(location, "unexpected root element"),
            );
            self.ignored_depth = 1;
            return;
        }
        match attrs.get("version") {
            None => self.report_missing_attribute(ROOT_ELEMENT, "version", location),
            Some(raw) => {
                if raw.parse::<i64>().is_err() {
                    self.report(
                        Diagnostic::error(format!(
                            "element `{ROOT_ELEMENT}` attribute `version` \"{raw}\" is not an integer"
                        ))
                        .with_code(ErrorCode::E100)
                        .with_label(location, "invalid version"),
                    );
                }
            }
        }
        self.state.scopes.push();
        self.state.repeat_depth.push(0);
        self.contexts.push(Context::Layout);
    }

    fn enter_layout(&mut self, name: &str, attrs: &Attributes, location: Location) {
        match name {
            "element" => {
                if let Some(element_name) = attrs.get("name") {
                    let generated = registry::is_generated(element_name);
                    if generated {
                        self.state.generated_element_names = true;
                    }
                    if let Err(first) = self.state.elements.define(element_name, location) {
                        if !generated {
                            self.report_duplicate_name("element", element_name, location, first);
                        }
                    }
                } else {
                    self.report_missing_attribute("element", "name", location);
                }
                self.contexts.push(Context::Element);
            }
            "group" => {
                if let Some(group_name) = attrs.get("name") {
                    let generated = registry::is_generated(group_name);
                    if generated {
                        self.state.generated_group_names = true;
                    }
                    if let Err(first) = self.state.groups.define(group_name, location) {
                        if !generated {
                            self.report_duplicate_name("group", group_name, location, first);
                        }
                    }
                } else {
                    self.report_missing_attribute("group", "name", location);
                }
                self.open_group_view();
            }
            "view" => {
                if let Some(view_name) = attrs.get("name") {
                    if let Err(first) = self.state.views.define(view_name, location) {
                        if !registry::is_generated(view_name) {
                            self.report_duplicate_name("view", view_name, location, first);
                        }
                    }
                } else {
                    self.report_missing_attribute("view", "name", location);
                }
                self.open_group_view();
            }
            "repeat" => self.enter_repeat(attrs, location),
            "param" => {
                self.check_parameter(attrs, location);
                self.ignored_depth = 1;
            }
            "script" => self.ignored_depth = 1,
            _ => {
                self.report_unexpected_element(name, location);
                self.ignored_depth = 1;
            }
        }
    }

    fn enter_element(&mut self, name: &str, attrs: &Attributes, location: Location) {
        if SHAPES.contains(&name) {
            self.open_shape();
        } else if name == "text" {
            if !attrs.contains("string") {
                self.report_missing_attribute("text", "string", location);
            }
            if attrs.contains("align") {
                if let Some(align) = self.check_int_attribute("text", attrs, "align", location) {
                    if !(0..=2).contains(&align) {
                        let raw = attrs.get("align").unwrap_or_default();
                        self.report(
                            Diagnostic::error(format!(
                                "element `text` attribute `align` \"{raw}\" not in valid range 0-2"
                            ))
                            .with_code(ErrorCode::E105)
                            .with_label(location, "alignment out of range"),
                        );
                    }
                }
            }
            self.open_shape();
        } else {
            self.ignored_depth = 1;
        }
    }

    fn enter_shape(&mut self, name: &str, attrs: &Attributes, location: Location) {
        match name {
            "bounds" => self.check_bounds(attrs, location),
            "color" => {
                if self.state.have_color.mark() {
                    self.report(
                        Diagnostic::error("duplicate element `color`")
                            .with_code(ErrorCode::E203)
                            .with_label(location, "color already declared"),
                    );
                }
                self.check_color(attrs, location);
            }
            _ => {}
        }
        self.ignored_depth = 1;
    }

    fn enter_group_view(&mut self, name: &str, attrs: &Attributes, location: Location) {
        if OBJECTS.contains(&name) {
            if let Some(element_ref) = attrs.get("element") {
                self.state.referenced_elements.reference(element_ref, location);
            } else {
                self.report_missing_attribute(name, "element", location);
            }
            if let Some(input_tag) = attrs.get("inputtag") {
                if !attrs.contains("inputmask") {
                    self.report(
                        Diagnostic::error(format!(
                            "element `{name}` has `inputtag` without `inputmask` attribute"
                        ))
                        .with_code(ErrorCode::E215)
                        .with_label(location, "inputmask required"),
                    );
                }
                self.check_tag(name, "inputtag", input_tag, location);
            }
            self.check_int_attribute(name, attrs, "inputmask", location);
            self.open_object();
        } else {
            match name {
                "screen" => {
                    if attrs.contains("index") {
                        if let Some(index) =
                            self.check_int_attribute("screen", attrs, "index", location)
                        {
                            if index < 0 {
                                let raw = attrs.get("index").unwrap_or_default();
                                self.report(
                                    Diagnostic::error(format!(
                                        "element `screen` attribute `index` \"{raw}\" is negative"
                                    ))
                                    .with_code(ErrorCode::E103)
                                    .with_label(location, "negative index"),
                                );
                            }
                        }
                        if attrs.contains("tag") {
                            self.report(
                                Diagnostic::error(
                                    "element `screen` has both `index` and `tag` attributes",
                                )
                                .with_code(ErrorCode::E209)
                                .with_label(location, "use one or the other"),
                            );
                        }
                    }
                    if let Some(screen_tag) = attrs.get("tag") {
                        self.check_tag("screen", "tag", screen_tag, location);
                        if tag::has_invalid_chars(screen_tag) {
                            self.report(
                                Diagnostic::error(format!(
                                    "element `screen` attribute `tag` \"{screen_tag}\" contains invalid characters"
                                ))
                                .with_code(ErrorCode::E208)
                                .with_label(location, "invalid tag"),
                            );
                        }
                    }
                    self.open_object();
                }
                "group" => {
                    if let Some(group_ref) = attrs.get("ref") {
                        self.state.referenced_groups.reference(group_ref, location);
                    } else {
                        self.report_missing_attribute("group", "ref", location);
                    }
                    self.open_object();
                }
                "repeat" => self.enter_repeat(attrs, location),
                "param" => {
                    self.check_parameter(attrs, location);
                    self.ignored_depth = 1;
                }
                "bounds" => {
                    self.check_bounds(attrs, location);
                    if self.state.in_repeat() {
                        self.report(
                            Diagnostic::error("element `bounds` inside `repeat`")
                                .with_code(ErrorCode::E214)
                                .with_label(location, "not allowed here"),
                        );
                    }
                    self.ignored_depth = 1;
                }
                _ => {
                    self.report_unexpected_element(name, location);
                    self.ignored_depth = 1;
                }
            }
        }
    }

    fn enter_object(&mut self, name: &str, attrs: &Attributes, location: Location) {
        if name == "bounds" {
            self.check_bounds(attrs, location);
        }
        self.ignored_depth = 1;
    }

    fn enter_repeat(&mut self, attrs: &Attributes, location: Location) {
        match attrs.get("count") {
            None => self.report_missing_attribute("repeat", "count", location),
            Some(raw) => {
                if let Some(count) = self.check_int_attribute("repeat", attrs, "count", location) {
                    if count <= 0 {
                        self.report(
                            Diagnostic::error(format!(
                                "element `repeat` attribute `count` \"{raw}\" is negative"
                            ))
                            .with_code(ErrorCode::E104)
                            .with_label(location, "count must be positive"),
                        );
                    }
                }
            }
        }
        self.state.scopes.push();
        if let Some(depth) = self.state.repeat_depth.last_mut() {
            *depth += 1;
        }
    }

    // =========================================================================
    // Exit transitions
    // =========================================================================

    fn exit_layout(&mut self) {
        self.state.scopes.pop();
        let depth = self
            .state
            .repeat_depth
            .last_mut()
            .expect("the layout context owns a repeat counter");
        if *depth > 0 {
            // Closing a repeat, not the layout root.
            *depth -= 1;
        } else {
            self.sweep_references();
            self.contexts.pop();
        }
    }

    fn exit_element(&mut self) {
        self.contexts.pop();
    }

    fn exit_shape(&mut self) {
        self.state.have_bounds.pop();
        self.state.have_color.pop();
        self.contexts.pop();
    }

    fn exit_group_view(&mut self) {
        self.state.scopes.pop();
        let depth = self
            .state
            .repeat_depth
            .last_mut()
            .expect("a group/view context owns a repeat counter");
        if *depth > 0 {
            *depth -= 1;
        } else {
            self.state.repeat_depth.pop();
            self.state.have_bounds.pop();
            self.contexts.pop();
        }
    }

    fn exit_object(&mut self) {
        self.state.have_bounds.pop();
        self.contexts.pop();
    }

    /// Check every recorded reference against the definitions, once, when
    /// the layout root closes. A generated name of a kind anywhere in the
    /// document suppresses the sweep for that kind.
    fn sweep_references(&mut self) {
        if !self.state.generated_element_names {
            let missing: Vec<(String, Location)> = self
                .state
                .referenced_elements
                .iter()
                .filter(|(name, _)| {
                    !self.state.elements.contains(name) && !registry::is_generated(name)
                })
                .map(|(name, first)| (name.to_string(), first))
                .collect();
            for (name, first) in missing {
                self.report(
                    Diagnostic::error(format!("element `{name}` not found"))
                        .with_code(ErrorCode::E300)
                        .with_label(first, "first referenced here"),
                );
            }
        }
        if !self.state.generated_group_names {
            let missing: Vec<(String, Location)> = self
                .state
                .referenced_groups
                .iter()
                .filter(|(name, _)| {
                    !self.state.groups.contains(name) && !registry::is_generated(name)
                })
                .map(|(name, first)| (name.to_string(), first))
                .collect();
            for (name, first) in missing {
                self.report(
                    Diagnostic::error(format!("group `{name}` not found"))
                        .with_code(ErrorCode::E301)
                        .with_label(first, "first referenced here"),
                );
            }
        }
    }

    // =========================================================================
    // Shared checks
    // =========================================================================

    fn open_shape(&mut self) {
        self.contexts.push(Context::Shape);
        self.state.have_bounds.push();
        self.state.have_color.push();
    }

    fn open_group_view(&mut self) {
        self.contexts.push(Context::GroupView);
        self.state.scopes.push();
        self.state.repeat_depth.push(0);
        self.state.have_bounds.push();
    }

    fn open_object(&mut self) {
        self.contexts.push(Context::Object);
        self.state.have_bounds.push();
    }

    fn check_bounds(&mut self, attrs: &Attributes, location: Location) {
        if self.state.have_bounds.mark() {
            self.report(
                Diagnostic::error("duplicate element `bounds`")
                    .with_code(ErrorCode::E202)
                    .with_label(location, "bounds already declared"),
            );
        }
        let (_, issues) = geometry::check(attrs);
        for issue in issues {
            let code = match &issue {
                BoundsIssue::BadFloat { .. } => ErrorCode::E101,
                BoundsIssue::LeftGreaterThanRight { .. }
                | BoundsIssue::TopGreaterThanBottom { .. } => ErrorCode::E205,
                BoundsIssue::NegativeWidth { .. } | BoundsIssue::NegativeHeight { .. } => {
                    ErrorCode::E206
                }
                BoundsIssue::MissingAnchor => ErrorCode::E207,
                BoundsIssue::MixedForms => ErrorCode::E204,
            };
            self.report(
                Diagnostic::error(format!("element `bounds` {issue}"))
                    .with_code(code)
                    .with_label(location, "invalid bounds"),
            );
        }
    }

    fn check_color(&mut self, attrs: &Attributes, location: Location) {
        for channel in color::CHANNELS {
            if let Some(raw) = attrs.get(channel) {
                match color::channel(raw) {
                    Ok(_) => {}
                    Err(color::ColorError::NotAFloat) => self.report(
                        Diagnostic::error(format!(
                            "element `color` attribute `{channel}` \"{raw}\" is not a floating point number"
                        ))
                        .with_code(ErrorCode::E101)
                        .with_label(location, "invalid channel"),
                    ),
                    Err(color::ColorError::OutOfRange) => self.report(
                        Diagnostic::error(format!(
                            "element `color` attribute `{channel}` \"{raw}\" outside valid range 0.0-1.0"
                        ))
                        .with_code(ErrorCode::E106)
                        .with_label(location, "channel out of range"),
                    ),
                }
            }
        }
    }

    fn check_tag(&mut self, element: &str, attr: &str, value: &str, location: Location) {
        for issue in tag::check(value) {
            let message = match issue {
                TagIssue::Empty => {
                    format!("element `{element}` attribute `{attr}` is empty")
                }
                _ => format!("element `{element}` attribute `{attr}` \"{value}\" {issue}"),
            };
            self.report(
                Diagnostic::error(message)
                    .with_code(ErrorCode::E208)
                    .with_label(location, "invalid tag"),
            );
        }
    }

    fn check_parameter(&mut self, attrs: &Attributes, location: Location) {
        let param_name = attrs.get("name").map(str::to_string);
        if param_name.is_none() {
            self.report_missing_attribute("param", "name", location);
        }
        if let Some(raw) = attrs.get("increment") {
            if numeric::numeric(raw).is_err() {
                self.report(
                    Diagnostic::error(format!(
                        "element `param` attribute `increment` \"{raw}\" is not a number"
                    ))
                    .with_code(ErrorCode::E102)
                    .with_label(location, "invalid increment"),
                );
            }
        }
        for shift in ["lshift", "rshift"] {
            if !attrs.contains(shift) {
                continue;
            }
            if let Some(amount) = self.check_int_attribute("param", attrs, shift, location) {
                if amount < 0 {
                    let raw = attrs.get(shift).unwrap_or_default();
                    self.report(
                        Diagnostic::error(format!(
                            "element `param` attribute `{shift}` \"{raw}\" is negative"
                        ))
                        .with_code(ErrorCode::E103)
                        .with_label(location, "must be non-negative"),
                    );
                }
            }
        }

        if self.state.in_repeat() {
            if attrs.contains("start") {
                if attrs.contains("value") {
                    self.report(
                        Diagnostic::error("element `param` has both `start` and `value` attributes")
                            .with_code(ErrorCode::E210)
                            .with_label(location, "use one or the other"),
                    );
                }
                if let Some(name) = &param_name {
                    if self.state.scopes.declare_incrementing(name).is_err()
                        && !registry::is_generated(name)
                    {
                        self.report_parameter_redefined(name, location);
                    }
                }
            } else {
                if !attrs.contains("value") {
                    self.report_missing_attribute("param", "value", location);
                }
                if attrs.contains("increment")
                    || attrs.contains("lshift")
                    || attrs.contains("rshift")
                {
                    self.report(
                        Diagnostic::error(
                            "element `param` has increment/lshift/rshift attribute(s) without `start` attribute",
                        )
                        .with_code(ErrorCode::E211)
                        .with_label(location, "requires start"),
                    );
                }
                if let Some(name) = &param_name {
                    if self.state.scopes.declare_fixed(name).is_err()
                        && !registry::is_generated(name)
                    {
                        self.report_parameter_redefined(name, location);
                    }
                }
            }
        } else {
            if attrs.contains("start")
                || attrs.contains("increment")
                || attrs.contains("lshift")
                || attrs.contains("rshift")
            {
                self.report(
                    Diagnostic::error(
                        "element `param` with start/increment/lshift/rshift attribute(s) not in repeat scope",
                    )
                    .with_code(ErrorCode::E212)
                    .with_label(location, "only valid inside repeat"),
                );
            }
            if !attrs.contains("value") {
                self.report_missing_attribute("param", "value", location);
            }
            if let Some(name) = &param_name {
                self.state.scopes.insert_fixed(name);
            }
        }
    }

    /// Parse an integer attribute, reporting a diagnostic on failure.
    ///
    /// Returns `None` when the attribute is absent, deferred, or invalid;
    /// only the invalid case reports.
    fn check_int_attribute(
        &mut self,
        element: &str,
        attrs: &Attributes,
        key: &str,
        location: Location,
    ) -> Option<i64> {
        let raw = attrs.get(key)?;
        match numeric::integer(raw) {
            Ok(value) => value,
            Err(_) => {
                self.report(
                    Diagnostic::error(format!(
                        "element `{element}` attribute `{key}` \"{raw}\" is not an integer"
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(location, "invalid integer"),
                );
                None
            }
        }
    }

    fn report_missing_attribute(&mut self, element: &str, attr: &str, location: Location) {
        self.report(
            Diagnostic::error(format!("element `{element}` missing attribute `{attr}`"))
                .with_code(ErrorCode::E200)
                .with_label(location, format!("`{attr}` is required")),
        );
    }

    fn report_duplicate_name(
        &mut self,
        element: &str,
        name: &str,
        location: Location,
        first: Location,
    ) {
        self.report(
            Diagnostic::error(format!("element `{element}` has duplicate name `{name}`"))
                .with_code(ErrorCode::E201)
                .with_label(location, "duplicate definition")
                .with_secondary_label(first, "first defined here")
                .with_help("remove the duplicate or use a different name"),
        );
    }

    fn report_parameter_redefined(&mut self, name: &str, location: Location) {
        self.report(
            Diagnostic::error(format!("incrementing parameter `{name}` redefined"))
                .with_code(ErrorCode::E213)
                .with_label(location, "incompatible redefinition"),
        );
    }

    fn report_unexpected_element(&mut self, name: &str, location: Location) {
        self.report(
            Diagnostic::error(format!("encountered unexpected element `{name}`"))
                .with_code(ErrorCode::E002)
                .with_label(location, "not part of the grammar here"),
        );
    }
}
