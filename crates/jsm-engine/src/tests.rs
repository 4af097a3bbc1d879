use crate::*;
use crate::pipeline::*;
use crate::stage1_license;
use crate::stage2_comments;
use crate::stage3_whitespace;
use crate::stage4_punctuation;
use crate::stage5_rename::{self, short_name, NameGenerator, RenameTable};
use std::collections::HashSet;

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

// ========== Stage 1: License ==========

#[test]
fn test_s1_extract_leading_block() {
    let (license, rest) = stage1_license::extract("/*! MIT */\nvar a;");
    assert_eq!(license.as_deref(), Some("/*! MIT */\n"));
    assert_eq!(rest, "\nvar a;");
}

#[test]
fn test_s1_not_at_start() {
    let (license, rest) = stage1_license::extract("  /*! MIT */ var a;");
    assert!(license.is_none());
    assert_eq!(rest, "  /*! MIT */ var a;");
}

#[test]
fn test_s1_plain_block_is_not_license() {
    let (license, _) = stage1_license::extract("/* plain */ var a;");
    assert!(license.is_none());
}

#[test]
fn test_s1_unterminated() {
    let (license, rest) = stage1_license::extract("/*! never closed");
    assert!(license.is_none());
    assert_eq!(rest, "/*! never closed");
}

#[test]
fn test_s1_first_block_only() {
    let (license, rest) = stage1_license::extract("/*! one */x;/*! two */");
    assert_eq!(license.as_deref(), Some("/*! one */\n"));
    assert_eq!(rest, "x;/*! two */");
}

#[test]
fn test_s1_reinsert() {
    assert_eq!(stage1_license::reinsert(Some("/*! L */\n"), "a;".into()), "/*! L */\na;");
    assert_eq!(stage1_license::reinsert(None, "a;".into()), "a;");
}

// ========== Stage 2: Comments ==========

#[test]
fn test_s2_line_comment() {
    assert_eq!(stage2_comments::strip("a = 1; // c\nb = 2;"), "a = 1; \nb = 2;");
}

#[test]
fn test_s2_block_comment_between_words() {
    assert_eq!(stage2_comments::strip("var/* x */y"), "var y");
}

#[test]
fn test_s2_block_comment_next_to_operator() {
    assert_eq!(stage2_comments::strip("a/* x */+b"), "a+b");
}

#[test]
fn test_s2_markers_inside_string() {
    let src = r#"s = "// not a comment /* nor this */";"#;
    assert_eq!(stage2_comments::strip(src), src);
}

#[test]
fn test_s2_markers_inside_regex() {
    let src = r"r = /\/\*x/;";
    assert_eq!(stage2_comments::strip(src), src);
}

#[test]
fn test_s2_only_comments() {
    assert_eq!(stage2_comments::strip("/* only */"), "");
}

#[test]
fn test_s2_later_license_marker_is_ordinary() {
    assert_eq!(stage2_comments::strip("x;/*! keep? */"), "x;");
}

#[test]
fn test_s2_line_comment_after_postfix_division() {
    assert_eq!(
        stage2_comments::strip("x = a++ / 2 // half\ny = 1;"),
        "x = a++ / 2 \ny = 1;"
    );
    assert_eq!(stage2_comments::strip("n = i-- / 2 /* q */;"), "n = i-- / 2 ;");
}

// ========== Stage 3: Whitespace ==========

#[test]
fn test_s3_trim_lines() {
    assert_eq!(stage3_whitespace::trim_lines("  a  \n\tb\t"), "a\nb");
}

#[test]
fn test_s3_collapse_runs() {
    assert_eq!(stage3_whitespace::collapse_runs("a   b\t\tc"), "a b c");
}

#[test]
fn test_s3_join_lines() {
    assert_eq!(stage3_whitespace::join_lines("a;\nb"), "a;b");
    assert_eq!(stage3_whitespace::join_lines("return\nx"), "return x");
}

#[test]
fn test_s3_normalize_keeps_string_spacing() {
    let src = "let s = 'a    b';\n\n  x  =  1;";
    assert_eq!(stage3_whitespace::normalize(src), "let s = 'a    b'; x = 1;");
}

#[test]
fn test_s3_multiline_template_untouched() {
    let src = "const t = `line1\n    line2`;\nfoo();";
    assert_eq!(stage3_whitespace::normalize(src), "const t = `line1\n    line2`;foo();");
}

#[test]
fn test_s3_empty() {
    assert_eq!(stage3_whitespace::normalize(""), "");
}

// ========== Stage 4: Punctuation ==========

#[test]
fn test_s4_operators() {
    assert_eq!(stage4_punctuation::tighten_operators("a = b + c ; d"), "a=b+c;d");
}

#[test]
fn test_s4_no_operator_fusion() {
    assert_eq!(stage4_punctuation::tighten_operators("a - -b"), "a- -b");
    assert_eq!(stage4_punctuation::tighten_operators("a + +b"), "a+ +b");
    assert_eq!(stage4_punctuation::tighten_operators("x = y++ + z"), "x=y++ +z");
}

#[test]
fn test_s4_collapse_semicolons() {
    assert_eq!(stage4_punctuation::collapse_semicolons("a;;;b;;"), "a;b;");
}

#[test]
fn test_s4_for_header_semicolons_kept() {
    assert_eq!(stage4_punctuation::collapse_semicolons("for(;;){}"), "for(;;){}");
}

#[test]
fn test_s4_function_keyword() {
    assert_eq!(stage4_punctuation::normalize_function("function   foo(){}"), "function foo(){}");
    assert_eq!(stage4_punctuation::normalize_function("x=function  (){}"), "x=function(){}");
}

#[test]
fn test_s4_comma() {
    assert_eq!(stage4_punctuation::strip_comma_space("a, b,  c"), "a,b,c");
}

#[test]
fn test_s4_brackets() {
    assert_eq!(stage4_punctuation::strip_bracket_space("if ( x ) { y [ 0 ] }"), "if(x){y[0]}");
}

#[test]
fn test_s4_literal_operators_untouched() {
    assert_eq!(stage4_punctuation::compact("a = 'x , y' ;"), "a='x , y';");
    assert_eq!(stage4_punctuation::compact(r#"s = "a + b" + c;"#), r#"s="a + b"+c;"#);
}

#[test]
fn test_s4_division_before_regex() {
    assert_eq!(stage4_punctuation::compact("a / /re/"), "a/ /re/");
}

// ========== Stage 5: Rename ==========

#[test]
fn test_s5_short_names() {
    assert_eq!(short_name(0), "a");
    assert_eq!(short_name(25), "z");
    assert_eq!(short_name(26), "a1");
    assert_eq!(short_name(27), "b1");
    assert_eq!(short_name(52), "a2");
}

#[test]
fn test_s5_generator_skips_taken() {
    let taken: HashSet<&str> = ["a"].into_iter().collect();
    let mut names = NameGenerator::new();
    assert_eq!(names.next_name(&taken), "b");
    assert_eq!(names.issued(), 2);
    assert_eq!(names.next_name(&taken), "c");
}

#[test]
fn test_s5_basic() {
    let out = stage5_rename::rename("const longVariableName=42;let anotherLongName=longVariableName+1;");
    assert_eq!(out, "const a=42;let b=a+1;");
}

#[test]
fn test_s5_redeclaration_single_entry() {
    let (out, table) = stage5_rename::rename_with_table("var x=1;var x=2;");
    assert_eq!(out, "var a=1;var a=2;");
    assert_eq!(table.len(), 1);
}

#[test]
fn test_s5_strings_untouched() {
    let out = stage5_rename::rename(r#"let msg="msg";log(msg);"#);
    assert_eq!(out, r#"let a="msg";log(a);"#);
}

#[test]
fn test_s5_member_access_untouched() {
    assert_eq!(stage5_rename::rename("let name=1;obj.name=name;"), "let a=1;obj.name=a;");
}

#[test]
fn test_s5_spread_renamed() {
    assert_eq!(stage5_rename::rename("const items=[];f(...items);"), "const a=[];f(...a);");
}

#[test]
fn test_s5_avoids_existing_identifiers() {
    let out = stage5_rename::rename("function f(a){let total=a;return total}");
    assert_eq!(out, "function f(a){let b=a;return b}");
}

#[test]
fn test_s5_template_interpolation() {
    let out = stage5_rename::rename("let n=1;const s=`n is ${n}`;");
    assert_eq!(out, "let a=1;const b=`n is ${a}`;");
}

#[test]
fn test_s5_regex_untouched() {
    let out = stage5_rename::rename("const re=/total/g;let total=0;");
    assert_eq!(out, "const a=/total/g;let b=0;");
}

#[test]
fn test_s5_dollar_identifier() {
    assert_eq!(stage5_rename::rename("let $el=1;$el++;"), "let a=1;a++;");
}

#[test]
fn test_s5_no_declarations() {
    let (out, table) = stage5_rename::rename_with_table("f(x,y);");
    assert_eq!(out, "f(x,y);");
    assert!(table.is_empty());
}

#[test]
fn test_s5_table_order() {
    let table = RenameTable::build("let zeta=1;let alpha=2;let zeta2=3;");
    let originals: Vec<_> = table.entries().iter().map(|(o, _)| o.as_str()).collect();
    assert_eq!(originals, vec!["zeta", "alpha", "zeta2"]);
    assert_eq!(table.get("alpha"), Some("b"));
}

#[test]
fn test_s5_many_names_unique() {
    let src: String = (0..60).map(|i| format!("let name{i}=0;")).collect();
    let table = RenameTable::build(&src);
    let shorts: HashSet<_> = table.entries().iter().map(|(_, s)| s.clone()).collect();
    assert_eq!(shorts.len(), 60);
    assert_eq!(table.get("name26"), Some("a1"));
}

// ========== Pipeline ==========

#[test]
fn test_division_after_update_operators() {
    let src = "x = a++ / 2; // half\ny = b-- / 4; // quarter\nz = (x + y) / 2 / 3;";
    assert_eq!(Minifier::default().minify(src), "x=a++/2;y=b--/4;z=(x+y)/2/3;");
}

#[test]
fn test_comment_after_postfix_division_does_not_swallow_next_line() {
    let out = Minifier::default().minify("x = a++ / 2 // half\ny = 1;");
    assert_eq!(out, "x=a++/2 y=1;");
    assert!(!out.contains("half"));
}

#[test]
fn test_pipeline_basic() {
    let input = "function test(a, b) {\n  // comment\n  return a + b;\n}";
    let out = Minifier::default().minify(input);
    assert_eq!(out, "function test(a,b){return a+b;}");
}

#[test]
fn test_pipeline_shorten_vars() {
    let input = "const longVariableName = 42;\nlet anotherLongName = longVariableName + 1;";
    let out = Minifier::with_flags(false, true).minify(input);
    assert!(!out.contains("longVariableName"));
    assert!(!out.contains("anotherLongName"));
    assert_eq!(out, "const a=42;let b=a+1;");
}

#[test]
fn test_pipeline_preserve_license() {
    let input = "/*!\n * License\n */\nfunction test() {}";
    let out = Minifier::with_flags(true, false).minify(input);
    assert_eq!(out, "/*!\n * License\n */\nfunction test(){}");
}

#[test]
fn test_pipeline_license_dropped_without_flag() {
    let out = Minifier::default().minify("/*! L */\nvar a = 1;");
    assert_eq!(out, "var a=1;");
}

#[test]
fn test_pipeline_license_not_at_start() {
    let result = Minifier::with_flags(true, false).run(" /*! L */x");
    assert_eq!(result.output, "x");
    assert!(!result.license_preserved);
}

#[test]
fn test_pipeline_empty() {
    let result = Minifier::with_flags(true, true).run("");
    assert_eq!(result.output, "");
    assert_eq!(result.reduction_pct, 0.0);
    assert_eq!(result.ratio(), 1.0);
}

#[test]
fn test_pipeline_only_comments() {
    assert_eq!(minify("// Just a comment\n/* Another comment */", MinifyOptions::default()), "");
}

#[test]
fn test_pipeline_complex_string() {
    let out = Minifier::default().minify(r#"const str = "This is a \"quoted\" string""#);
    assert_eq!(out, r#"const str="This is a \"quoted\" string""#);
}

#[test]
fn test_pipeline_regex_literal() {
    assert_eq!(Minifier::default().minify("const regex = /test/g;"), "const regex=/test/g;");
}

#[test]
fn test_pipeline_comment_marker_in_string() {
    let out = Minifier::default().minify("var u = \"http://a.b\"; // c");
    assert_eq!(out, "var u=\"http://a.b\";");
}

#[test]
fn test_pipeline_whitespace_insensitive_match() {
    let input = "function test(a, b) {\n\t\t// This is a comment\n\t\treturn a + b;\n\t}";
    let out = Minifier::default().minify(input);
    assert_eq!(squash(&out), squash("function test(a,b){return a+b;}"));
}

#[test]
fn test_pipeline_stages_default() {
    let result = Minifier::default().run("a = 1;");
    assert_eq!(result.stages_applied, vec![Stage::Comments, Stage::Whitespace, Stage::Punctuation]);
}

#[test]
fn test_pipeline_stages_all() {
    let result = Minifier::with_flags(true, true).run("/*! L */\nlet x = 1;");
    assert_eq!(
        result.stages_applied,
        vec![
            Stage::License,
            Stage::Comments,
            Stage::Whitespace,
            Stage::Punctuation,
            Stage::Rename,
            Stage::Reinsert,
        ]
    );
    assert_eq!(result.output, "/*! L */\nlet a=1;");
}

#[test]
fn test_pipeline_reduction() {
    let result = Minifier::default().run("var   a   =   1 ;   // note");
    assert_eq!(result.output, "var a=1;");
    assert_eq!(result.minified_len, 8);
    assert!(result.reduction_pct > 50.0);
    assert!(result.ratio() < 0.5);
}

#[test]
fn test_pipeline_debug_sink() {
    let mut sink: Vec<u8> = Vec::new();
    let out = Minifier::default().minify_with_sink("a = 1; // x", &mut sink);
    assert_eq!(out, "a=1;");
    let log = String::from_utf8(sink).unwrap();
    assert!(log.contains("[comments]"));
    assert!(log.contains("[whitespace]"));
    assert!(log.contains("[punctuation] 4 bytes"));
    assert!(!log.contains("[rename]"));
}

#[test]
fn test_pipeline_converges() {
    let input = "function f( x ) {\n  var y = x * 2; ;\n  return y - -1;\n}\nf( 3 );";
    let minifier = Minifier::default();
    let once = minifier.minify(input);
    let twice = minifier.minify(&once);
    let thrice = minifier.minify(&twice);
    assert_eq!(twice, thrice);
    assert!(twice.len() <= once.len());
}

#[test]
fn test_pipeline_brace_balance() {
    let input = "if (a) {\n  b[0] = (c + d);\n} else {\n  e();\n}";
    let out = Minifier::with_flags(false, true).minify(input);
    for (open, close) in [('{', '}'), ('[', ']'), ('(', ')')] {
        assert_eq!(out.matches(open).count(), input.matches(open).count());
        assert_eq!(out.matches(close).count(), input.matches(close).count());
    }
}

#[test]
fn test_pipeline_unbalanced_input_does_not_panic() {
    let inputs = ["'unterminated", "/* open", "`tmpl ${", "a = /", "}}}((", "\\", "é/*ü"];
    for input in inputs {
        let _ = Minifier::with_flags(true, true).minify(input);
    }
}

#[test]
fn test_pipeline_minifier_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Minifier>();
}

#[test]
fn test_options_deserialize_partial() {
    let opts: MinifyOptions = serde_json::from_str(r#"{"shorten_vars":true}"#).unwrap();
    assert_eq!(opts, MinifyOptions { preserve_license: false, shorten_vars: true });
}
