//! Grammar tests for the layout validator.
//!
//! These tests drive the validator through the full event reader and
//! verify that every grammar rule reports the right diagnostics, that
//! valid documents pass cleanly, and that skipped subtrees are still
//! forwarded to the sink.

use crate::error::{Diagnostic, ErrorCode, LayoutError};
use crate::reader::{self, ReaderError};
use crate::validator::Validator;

/// Validate a source string, panicking on malformed markup.
fn validate(source: &str) -> Result<(), LayoutError> {
    let mut validator = Validator::new(());
    if let Err(err) = reader::parse_document(source, &mut validator) {
        panic!("expected well-formed input, got: {err}");
    }
    validator.finish().1
}

/// Validate and return the accumulated diagnostics (empty when valid).
fn diagnostics(source: &str) -> Vec<Diagnostic> {
    match validate(source) {
        Ok(()) => Vec::new(),
        Err(err) => err.diagnostics().to_vec(),
    }
}

fn assert_valid(source: &str) {
    let diags = diagnostics(source);
    assert!(
        diags.is_empty(),
        "expected no diagnostics, got: {:?}",
        diags.iter().map(|d| d.to_string()).collect::<Vec<_>>()
    );
}

/// Assert exactly one diagnostic with the given code, returning it.
fn assert_single_error(source: &str, code: ErrorCode) -> Diagnostic {
    let diags = diagnostics(source);
    assert_eq!(
        diags.len(),
        1,
        "expected exactly one diagnostic, got: {:?}",
        diags.iter().map(|d| d.to_string()).collect::<Vec<_>>()
    );
    assert_eq!(diags[0].code(), Some(code), "wrong code: {}", diags[0]);
    diags[0].clone()
}

fn count_code(source: &str, code: ErrorCode) -> usize {
    diagnostics(source)
        .iter()
        .filter(|diag| diag.code() == Some(code))
        .count()
}

mod document_structure {
    use super::*;

    #[test]
    fn test_minimal_document() {
        assert_valid(r#"<mamelayout version="2"></mamelayout>"#);
    }

    #[test]
    fn test_full_document() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <element name="lamp">
                    <rect>
                        <bounds left="0" top="0" right="1" bottom="1"/>
                        <color red="1.0" green="0.5" blue="0.0" alpha="1.0"/>
                    </rect>
                    <text string="POWER" align="1"/>
                </element>
                <element name="digit">
                    <led7seg/>
                </element>
                <group name="panel">
                    <bezel element="lamp">
                        <bounds x="0" y="0" width="10" height="10"/>
                    </bezel>
                </group>
                <view name="Default Layout">
                    <screen index="0">
                        <bounds left="0" top="0" right="4" bottom="3"/>
                    </screen>
                    <group ref="panel"/>
                    <backdrop element="digit">
                        <bounds x="5" y="5" width="2" height="3"/>
                    </backdrop>
                    <repeat count="4">
                        <param name="n" start="0" increment="1"/>
                        <bezel element="lamp">
                            <bounds x="~n~" y="0" width="1" height="1"/>
                        </bezel>
                    </repeat>
                </view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_wrong_root_element() {
        let diag = assert_single_error(r#"<layout version="2"></layout>"#, ErrorCode::E001);
        assert!(diag.message().contains("`layout`"));
    }

    #[test]
    fn test_wrong_root_subtree_is_skipped() {
        // Nothing inside an unexpected root is validated.
        assert_single_error(
            r#"<layout><element><color red="9.9"/></element></layout>"#,
            ErrorCode::E001,
        );
    }

    #[test]
    fn test_missing_version() {
        assert_single_error(r#"<mamelayout></mamelayout>"#, ErrorCode::E200);
    }

    #[test]
    fn test_version_must_be_plain_integer() {
        assert_single_error(r#"<mamelayout version="two"></mamelayout>"#, ErrorCode::E100);
        // Radix prefixes are not part of the version syntax.
        assert_single_error(r#"<mamelayout version="0x2"></mamelayout>"#, ErrorCode::E100);
    }

    #[test]
    fn test_unexpected_layout_child() {
        let diag = assert_single_error(
            r#"<mamelayout version="2"><widget/></mamelayout>"#,
            ErrorCode::E002,
        );
        assert!(diag.message().contains("`widget`"));
    }

    #[test]
    fn test_unexpected_child_subtree_is_skipped() {
        // The bad color inside the unknown element must not be reported.
        assert_single_error(
            r#"<mamelayout version="2"><widget><color red="9.9"/></widget></mamelayout>"#,
            ErrorCode::E002,
        );
    }

    #[test]
    fn test_script_is_skipped() {
        assert_valid(r#"<mamelayout version="2"><script>function foo() end</script></mamelayout>"#);
    }
}

mod names_and_references {
    use super::*;

    #[test]
    fn test_duplicate_element_name() {
        let source = r#"
            <mamelayout version="2">
                <element name="lamp"><rect/></element>
                <element name="lamp"><disk/></element>
            </mamelayout>
        "#;
        let diag = assert_single_error(source, ErrorCode::E201);
        assert!(diag.message().contains("`lamp`"));

        // The secondary label cites the first definition.
        let secondary = diag
            .labels()
            .iter()
            .find(|label| label.is_secondary())
            .expect("secondary label");
        let primary = diag.primary_location().expect("primary label");
        assert!(secondary.location().line() < primary.line());
    }

    #[test]
    fn test_duplicate_group_and_view_names() {
        let source = r#"
            <mamelayout version="2">
                <group name="panel"/>
                <group name="panel"/>
                <view name="Main"/>
                <view name="Main"/>
            </mamelayout>
        "#;
        assert_eq!(count_code(source, ErrorCode::E201), 2);
    }

    #[test]
    fn test_generated_names_may_repeat() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <element name="lamp~n~"><rect/></element>
                <element name="lamp~n~"><disk/></element>
                <view name="view~n~"/>
                <view name="view~n~"/>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_undefined_element_reference() {
        let source = r#"
            <mamelayout version="2">
                <view name="Main">
                    <bezel element="missing"/>
                    <bezel element="missing"/>
                </view>
            </mamelayout>
        "#;
        // Reported once, at the first reference.
        let diag = assert_single_error(source, ErrorCode::E300);
        assert!(diag.message().contains("`missing`"));
        assert_eq!(diag.labels()[0].message(), "first referenced here");
    }

    #[test]
    fn test_forward_reference_resolves() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <view name="Main"><bezel element="lamp"/></view>
                <element name="lamp"><rect/></element>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_undefined_group_reference() {
        let source = r#"
            <mamelayout version="2">
                <view name="Main"><group ref="nowhere"/></view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E301);
    }

    #[test]
    fn test_generated_definition_suppresses_element_sweep() {
        // One generated element name disables the whole undefined-element
        // check for the document.
        assert_valid(
            r#"
            <mamelayout version="2">
                <element name="lamp~n~"><rect/></element>
                <view name="Main"><bezel element="missing"/></view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_generated_reference_is_not_swept() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <view name="Main"><bezel element="lamp~n~"/></view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_group_sweep_independent_of_element_sweep() {
        // A generated element name does not suppress the group sweep.
        let source = r#"
            <mamelayout version="2">
                <element name="lamp~n~"><rect/></element>
                <view name="Main"><group ref="nowhere"/></view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E301);
    }
}

mod element_bodies {
    use super::*;

    #[test]
    fn test_text_requires_string() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><text/></element></mamelayout>"#,
            ErrorCode::E200,
        );
    }

    #[test]
    fn test_text_align_range() {
        assert_valid(
            r#"<mamelayout version="2"><element name="e"><text string="X" align="2"/></element></mamelayout>"#,
        );
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><text string="X" align="3"/></element></mamelayout>"#,
            ErrorCode::E105,
        );
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><text string="X" align="wide"/></element></mamelayout>"#,
            ErrorCode::E100,
        );
    }

    #[test]
    fn test_unknown_element_child_is_silently_skipped() {
        assert_valid(
            r#"<mamelayout version="2"><element name="e"><sparkle/></element></mamelayout>"#,
        );
    }

    #[test]
    fn test_duplicate_bounds_in_shape() {
        let source = r#"
            <mamelayout version="2">
                <element name="e">
                    <rect>
                        <bounds left="0"/>
                        <bounds left="0"/>
                    </rect>
                </element>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E202);
    }

    #[test]
    fn test_duplicate_color_in_shape() {
        let source = r#"
            <mamelayout version="2">
                <element name="e">
                    <disk>
                        <color red="1.0"/>
                        <color red="0.5"/>
                    </disk>
                </element>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E203);
    }

    #[test]
    fn test_sibling_shapes_have_independent_flags() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <element name="e">
                    <rect><bounds left="0"/><color red="1.0"/></rect>
                    <disk><bounds left="0"/><color red="0.5"/></disk>
                </element>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_color_channel_range() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><rect><color red="1.5"/></rect></element></mamelayout>"#,
            ErrorCode::E106,
        );
        assert_valid(
            r#"<mamelayout version="2"><element name="e"><rect><color red="1.0"/></rect></element></mamelayout>"#,
        );
    }

    #[test]
    fn test_color_channel_bad_float() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><rect><color red="bright"/></rect></element></mamelayout>"#,
            ErrorCode::E101,
        );
    }
}

mod bounds_grammar {
    use super::*;

    #[test]
    fn test_mixed_forms_single_error() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><rect><bounds left="0" x="0"/></rect></element></mamelayout>"#,
            ErrorCode::E204,
        );
    }

    #[test]
    fn test_left_greater_than_right() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><rect><bounds left="10" right="5"/></rect></element></mamelayout>"#,
            ErrorCode::E205,
        );
        assert_valid(
            r#"<mamelayout version="2"><element name="e"><rect><bounds left="0" right="10"/></rect></element></mamelayout>"#,
        );
    }

    #[test]
    fn test_negative_size() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><rect><bounds x="0" width="-4"/></rect></element></mamelayout>"#,
            ErrorCode::E206,
        );
    }

    #[test]
    fn test_missing_anchor() {
        assert_single_error(
            r#"<mamelayout version="2"><element name="e"><rect><bounds width="4"/></rect></element></mamelayout>"#,
            ErrorCode::E207,
        );
    }

    #[test]
    fn test_placeholder_bounds_defer() {
        assert_valid(
            r#"<mamelayout version="2"><element name="e"><rect><bounds left="~col~" right="0"/></rect></element></mamelayout>"#,
        );
    }
}

mod group_view_bodies {
    use super::*;

    #[test]
    fn test_object_requires_element_attribute() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><bezel/></view></mamelayout>"#,
            ErrorCode::E200,
        );
    }

    #[test]
    fn test_object_bounds_at_most_once() {
        let source = r#"
            <mamelayout version="2">
                <element name="lamp"><rect/></element>
                <view name="Main">
                    <bezel element="lamp">
                        <bounds left="0"/>
                        <bounds left="0"/>
                    </bezel>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E202);
    }

    #[test]
    fn test_object_other_children_ignored() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <element name="lamp"><rect/></element>
                <view name="Main">
                    <bezel element="lamp"><orientation rotate="90"/></bezel>
                </view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_screen_negative_index() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><screen index="-1"/></view></mamelayout>"#,
            ErrorCode::E103,
        );
    }

    #[test]
    fn test_screen_index_and_tag_exclusive() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><screen index="0" tag="screen"/></view></mamelayout>"#,
            ErrorCode::E209,
        );
    }

    #[test]
    fn test_screen_tag_syntax() {
        assert_valid(
            r#"<mamelayout version="2"><view name="Main"><screen tag="screen.0"/></view></mamelayout>"#,
        );
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><screen tag="Screen"/></view></mamelayout>"#,
            ErrorCode::E208,
        );
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><screen tag="a::b"/></view></mamelayout>"#,
            ErrorCode::E208,
        );
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><screen tag="^screen"/></view></mamelayout>"#,
            ErrorCode::E208,
        );
    }

    #[test]
    fn test_group_reference_requires_ref() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><group/></view></mamelayout>"#,
            ErrorCode::E200,
        );
    }

    #[test]
    fn test_view_bounds_at_most_once() {
        let source = r#"
            <mamelayout version="2">
                <view name="Main">
                    <bounds left="0"/>
                    <bounds left="0"/>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E202);
    }

    #[test]
    fn test_inputtag_requires_inputmask() {
        let source = r#"
            <mamelayout version="2">
                <element name="lamp"><rect/></element>
                <view name="Main">
                    <bezel element="lamp" inputtag="buttons"/>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E215);
    }

    #[test]
    fn test_inputtag_syntax_checked() {
        let source = r#"
            <mamelayout version="2">
                <element name="lamp"><rect/></element>
                <view name="Main">
                    <bezel element="lamp" inputtag="buttons::row" inputmask="0x01"/>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E208);
    }

    #[test]
    fn test_inputmask_must_be_integer() {
        let source = r#"
            <mamelayout version="2">
                <element name="lamp"><rect/></element>
                <view name="Main">
                    <bezel element="lamp" inputtag="buttons" inputmask="all"/>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E100);
    }
}

mod repeats_and_params {
    use super::*;

    #[test]
    fn test_repeat_requires_count() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat><param name="n" start="0"/></repeat></view></mamelayout>"#,
            ErrorCode::E200,
        );
    }

    #[test]
    fn test_repeat_count_positive() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="-1"><param name="n" start="0"/></repeat></view></mamelayout>"#,
            ErrorCode::E104,
        );
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="0"><param name="n" start="0"/></repeat></view></mamelayout>"#,
            ErrorCode::E104,
        );
        assert_valid(
            r#"<mamelayout version="2"><view name="Main"><repeat count="3"><param name="n" start="0"/></repeat></view></mamelayout>"#,
        );
    }

    #[test]
    fn test_repeat_count_placeholder_defers() {
        assert_valid(
            r#"<mamelayout version="2"><view name="Main"><repeat count="~n~"><param name="m" start="0"/></repeat></view></mamelayout>"#,
        );
    }

    #[test]
    fn test_bounds_inside_repeat() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="2"><bounds left="0"/></repeat></view></mamelayout>"#,
            ErrorCode::E214,
        );
    }

    #[test]
    fn test_bounds_legal_after_repeat_closes() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <view name="Main">
                    <repeat count="2"><param name="n" start="0"/></repeat>
                    <bounds left="0"/>
                </view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_param_start_and_value_exclusive() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="2"><param name="x" start="0" value="1"/></repeat></view></mamelayout>"#,
            ErrorCode::E210,
        );
    }

    #[test]
    fn test_param_fixed_form_requires_value() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="2"><param name="x"/></repeat></view></mamelayout>"#,
            ErrorCode::E200,
        );
    }

    #[test]
    fn test_param_increment_without_start() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="2"><param name="x" value="1" increment="2"/></repeat></view></mamelayout>"#,
            ErrorCode::E211,
        );
    }

    #[test]
    fn test_param_repeat_attributes_outside_repeat() {
        assert_single_error(
            r#"<mamelayout version="2"><param name="x" start="0"/></mamelayout>"#,
            ErrorCode::E212,
        );
    }

    #[test]
    fn test_param_fixed_outside_repeat() {
        assert_valid(r#"<mamelayout version="2"><param name="x" value="7"/></mamelayout>"#);
    }

    #[test]
    fn test_param_missing_name() {
        assert_single_error(
            r#"<mamelayout version="2"><param value="7"/></mamelayout>"#,
            ErrorCode::E200,
        );
    }

    #[test]
    fn test_param_shift_negative() {
        assert_single_error(
            r#"<mamelayout version="2"><view name="Main"><repeat count="2"><param name="x" start="0" lshift="-1"/></repeat></view></mamelayout>"#,
            ErrorCode::E103,
        );
    }

    #[test]
    fn test_incrementing_param_redefined() {
        let source = r#"
            <mamelayout version="2">
                <view name="Main">
                    <repeat count="2">
                        <param name="x" start="0"/>
                        <param name="x" start="4"/>
                    </repeat>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E213);
    }

    #[test]
    fn test_fixed_param_cannot_shadow_incrementing() {
        let source = r#"
            <mamelayout version="2">
                <view name="Main">
                    <repeat count="2">
                        <param name="x" start="0"/>
                        <param name="x" value="1"/>
                    </repeat>
                </view>
            </mamelayout>
        "#;
        assert_single_error(source, ErrorCode::E213);
    }

    #[test]
    fn test_fixed_param_redeclaration_tolerated() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <view name="Main">
                    <repeat count="2">
                        <param name="x" value="1"/>
                        <param name="x" value="2"/>
                    </repeat>
                </view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_generated_param_names_exempt() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <view name="Main">
                    <repeat count="2">
                        <param name="x~n~" start="0"/>
                        <param name="x~n~" start="4"/>
                    </repeat>
                </view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_nested_repeats_scope_independently() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <view name="Main">
                    <repeat count="2">
                        <param name="x" start="0"/>
                        <repeat count="3">
                            <param name="x" start="0"/>
                        </repeat>
                    </repeat>
                </view>
            </mamelayout>
            "#,
        );
    }

    #[test]
    fn test_outer_fixed_param_rebinds_freely_outside_repeat() {
        assert_valid(
            r#"
            <mamelayout version="2">
                <param name="x" value="1"/>
                <param name="x" value="2"/>
            </mamelayout>
            "#,
        );
    }
}

mod event_forwarding {
    use super::*;
    use easel_core::event::{Attributes, EventSink};
    use std::io;

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
    }

    impl EventSink for RecordingSink {
        fn start_document(&mut self) -> io::Result<()> {
            self.events.push("start-document".into());
            Ok(())
        }

        fn end_document(&mut self) -> io::Result<()> {
            self.events.push("end-document".into());
            Ok(())
        }

        fn start_element(&mut self, name: &str, _attrs: &Attributes) -> io::Result<()> {
            self.events.push(format!("<{name}>"));
            Ok(())
        }

        fn end_element(&mut self, name: &str) -> io::Result<()> {
            self.events.push(format!("</{name}>"));
            Ok(())
        }

        fn characters(&mut self, text: &str) -> io::Result<()> {
            self.events.push(format!("text:{text}"));
            Ok(())
        }
    }

    #[test]
    fn test_skipped_subtrees_still_forwarded() {
        let source =
            r#"<mamelayout version="2"><script>init</script><widget><inner/></widget></mamelayout>"#;
        let mut validator = Validator::new(RecordingSink::default());
        reader::parse_document(source, &mut validator).expect("well-formed");
        let (sink, result) = validator.finish();

        // The unknown element is an error, but every event still reached
        // the sink.
        assert!(result.is_err());
        assert_eq!(
            sink.events,
            vec![
                "start-document",
                "<mamelayout>",
                "<script>",
                "text:init",
                "</script>",
                "<widget>",
                "<inner>",
                "</inner>",
                "</widget>",
                "</mamelayout>",
                "end-document",
            ]
        );
    }
}
