//! Import declaration parser integration tests.

use pretty_assertions::assert_eq;
use srcweave_imports::{
    parse_imports, parse_script_imports, parse_style_imports, BindingKind, ImportBinding,
    ImportSyntax,
};

const IMPORTER: &str = "/project/src/app/main.tsx";

fn bindings(text: &str, module: &str) -> Vec<ImportBinding> {
    let imports = parse_script_imports(text, IMPORTER);
    imports
        .get(module)
        .unwrap_or_else(|| panic!("no record for {}", module))
        .bindings
        .clone()
}

// ============================================================================
// Script imports
// ============================================================================

#[test]
fn test_default_import() {
    assert_eq!(
        bindings("import React from 'react';", "react"),
        vec![ImportBinding::default_import("React")]
    );
}

#[test]
fn test_named_imports_with_aliases() {
    assert_eq!(
        bindings("import { useState, useEffect as effect } from 'react';", "react"),
        vec![
            ImportBinding::named("useState"),
            ImportBinding::named("useEffect").with_alias("effect"),
        ]
    );
}

#[test]
fn test_namespace_import() {
    assert_eq!(
        bindings("import * as utils from './utils';", "./utils"),
        vec![ImportBinding::namespace("utils")]
    );
}

#[test]
fn test_default_with_named_and_namespace() {
    assert_eq!(
        bindings("import React, { memo } from 'react';", "react"),
        vec![
            ImportBinding::default_import("React"),
            ImportBinding::named("memo"),
        ]
    );
    assert_eq!(
        bindings("import lib, * as all from 'lib';", "lib"),
        vec![
            ImportBinding::default_import("lib"),
            ImportBinding::namespace("all"),
        ]
    );
}

#[test]
fn test_default_as_named_entry() {
    assert_eq!(
        bindings("import { default as Button, size } from './Button';", "./Button"),
        vec![
            ImportBinding::default_import("Button"),
            ImportBinding::named("size"),
        ]
    );
}

#[test]
fn test_type_only_imports() {
    assert_eq!(
        bindings("import type { Props, State as S } from './types';", "./types"),
        vec![
            ImportBinding::named("Props").type_only(),
            ImportBinding::named("State").with_alias("S").type_only(),
        ]
    );
    assert_eq!(
        bindings("import { type Props, render } from './lib';", "./lib"),
        vec![
            ImportBinding::named("Props").type_only(),
            ImportBinding::named("render"),
        ]
    );
    assert_eq!(
        bindings("import type Theme from './theme';", "./theme"),
        vec![ImportBinding::default_import("Theme").type_only()]
    );
}

#[test]
fn test_binding_named_type() {
    assert_eq!(
        bindings("import type from './t';", "./t"),
        vec![ImportBinding::default_import("type")]
    );
    assert_eq!(
        bindings("import { type } from './t';", "./t"),
        vec![ImportBinding::named("type")]
    );
}

#[test]
fn test_binding_named_from() {
    assert_eq!(
        bindings("import from from './from';", "./from"),
        vec![ImportBinding::default_import("from")]
    );
    assert_eq!(
        bindings("import { from } from './from';", "./from"),
        vec![ImportBinding::named("from")]
    );
}

#[test]
fn test_comments_inside_named_block() {
    let text = "import {\n  a, // first\n  /* b, */ c,\n} from './abc';";
    assert_eq!(
        bindings(text, "./abc"),
        vec![ImportBinding::named("a"), ImportBinding::named("c")]
    );
}

#[test]
fn test_multiline_declaration() {
    let text = "import {\n  Button,\n  Card as Panel,\n} from\n  '@ui/kit'\n";
    assert_eq!(
        bindings(text, "@ui/kit"),
        vec![
            ImportBinding::named("Button"),
            ImportBinding::named("Card").with_alias("Panel"),
        ]
    );
}

#[test]
fn test_side_effect_import() {
    let imports = parse_script_imports("import './polyfills';\nimport 'reflect-metadata';", IMPORTER);
    let record = imports.get("./polyfills").unwrap();
    assert!(record.bindings.is_empty());
    assert!(record.side_effect);
    assert!(imports.get("reflect-metadata").unwrap().is_external);
}

#[test]
fn test_imports_in_comments_and_strings_are_ignored() {
    let text = r#"
// import a from 'commented';
/* import b from 'blocked'; */
const s = "import c from 'quoted'";
const t = `import d from 'templated'`;
import real from './real';
"#;
    let imports = parse_script_imports(text, IMPORTER);
    assert_eq!(imports.len(), 1);
    assert!(imports.get("./real").is_some());
}

#[test]
fn test_non_declarations_are_skipped() {
    let text = r#"
const lazy = import('./lazy');
const url = import.meta.url;
import fs = require('fs');
const reimport = 1;
import ok from './ok';
"#;
    let imports = parse_script_imports(text, IMPORTER);
    let modules: Vec<&str> = imports.records().map(|r| r.module_path.as_str()).collect();
    assert_eq!(modules, vec!["./ok"]);
}

#[test]
fn test_quoted_export_names() {
    assert_eq!(
        bindings("import { 'str' as s, plain } from './s';", "./s"),
        vec![
            ImportBinding::named("'str'").with_alias("s"),
            ImportBinding::named("plain"),
        ]
    );
    assert_eq!(
        bindings(r#"import { "a, b}" as ab, c } from './q';"#, "./q"),
        vec![
            ImportBinding::named(r#""a, b}""#).with_alias("ab"),
            ImportBinding::named("c"),
        ]
    );
    // Without an alias a quoted name binds nothing, but the module stays.
    assert!(bindings("import { 'str' } from './s';", "./s").is_empty());
}

#[test]
fn test_string_outside_braces_ends_the_declaration() {
    let text = "import x 'oops' from './a';\nimport y from './b';";
    let imports = parse_script_imports(text, IMPORTER);
    let modules: Vec<&str> = imports.records().map(|r| r.module_path.as_str()).collect();
    assert_eq!(modules, vec!["./b"]);
}

#[test]
fn test_malformed_declaration_is_skipped() {
    let text = "import broken from './broken\nimport fine from './fine';";
    let imports = parse_script_imports(text, IMPORTER);
    let modules: Vec<&str> = imports.records().map(|r| r.module_path.as_str()).collect();
    assert_eq!(modules, vec!["./fine"]);
}

#[test]
fn test_relative_and_external_classification() {
    let text = "import a from './a';\nimport b from '../b';\nimport c from '/c';\nimport d from 'd';\nimport e from '@scope/e';";
    let imports = parse_script_imports(text, IMPORTER);
    let relative: Vec<&str> = imports.relative().map(|r| r.module_path.as_str()).collect();
    let external: Vec<&str> = imports.external().map(|r| r.module_path.as_str()).collect();
    assert_eq!(relative, vec!["./a", "../b", "/c"]);
    assert_eq!(external, vec!["d", "@scope/e"]);
}

#[test]
fn test_relative_records_carry_absolute_specifier() {
    let imports = parse_script_imports("import a from '../lib/a';\nimport r from 'react';", IMPORTER);
    assert_eq!(
        imports.get("../lib/a").unwrap().absolute_specifier.as_deref(),
        Some("/project/src/lib/a")
    );
    assert_eq!(imports.get("react").unwrap().absolute_specifier, None);
}

#[test]
fn test_repeated_module_accumulates() {
    let text = "import { a } from './m';\nimport { b } from './m';";
    let imports = parse_script_imports(text, IMPORTER);
    assert_eq!(imports.len(), 1);
    let record = imports.get("./m").unwrap();
    assert_eq!(
        record.bindings,
        vec![ImportBinding::named("a"), ImportBinding::named("b")]
    );
    assert_eq!(record.source_positions.len(), 2);
    assert_eq!(&text[record.source_positions[0].to_range()], "import { a } from './m'");
    assert!(!record.side_effect);
}

#[test]
fn test_attach_resolution() {
    let mut imports = parse_script_imports("import a from './a';\nimport r from 'react';", IMPORTER);
    imports.get_mut("./a").unwrap().attach_resolution("/project/src/app/a.ts");
    imports.get_mut("react").unwrap().attach_resolution("/node_modules/react/index.js");
    assert_eq!(
        imports.get("./a").unwrap().resolved_path.as_deref(),
        Some("/project/src/app/a.ts")
    );
    assert_eq!(imports.get("react").unwrap().resolved_path, None);
}

#[test]
fn test_binding_kinds() {
    let imports = parse_script_imports("import D, { n } from 'm';\nimport * as NS from 'm2';", IMPORTER);
    let kinds: Vec<BindingKind> = imports
        .records()
        .flat_map(|r| r.bindings.iter().map(|b| b.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![BindingKind::Default, BindingKind::Named, BindingKind::Namespace]
    );
}

// ============================================================================
// Style-sheet imports
// ============================================================================

#[test]
fn test_style_imports() {
    let text = r#"
@import 'base.css';
@import "./theme.css" screen;
@import url('../fonts.css');
@import url(components/button.css);
@import url("https://fonts.example.com/inter.css");
@import '//cdn.example.com/reset.css';
"#;
    let imports = parse_style_imports(text, "/project/styles/main.css");
    let modules: Vec<(&str, bool)> = imports
        .records()
        .map(|r| (r.module_path.as_str(), r.is_external))
        .collect();
    assert_eq!(
        modules,
        vec![
            ("./base.css", false),
            ("./theme.css", false),
            ("../fonts.css", false),
            ("./components/button.css", false),
            ("https://fonts.example.com/inter.css", true),
            ("//cdn.example.com/reset.css", true),
        ]
    );
    assert!(imports
        .records()
        .all(|r| r.syntax == ImportSyntax::StyleSheet && r.side_effect));
}

#[test]
fn test_style_import_of_dot_file_gains_marker() {
    let imports = parse_style_imports("@import \".hidden.css\";", "/s/main.css");
    let record = imports.get("./.hidden.css").unwrap();
    assert!(!record.is_external);
    assert_eq!(record.absolute_specifier.as_deref(), Some("/s/.hidden.css"));
}

#[test]
fn test_malformed_style_imports_are_skipped() {
    let text = "@import url(broken.css\n@import 'open\n@import 'ok.css';";
    let imports = parse_style_imports(text, "/s/main.css");
    let modules: Vec<&str> = imports.records().map(|r| r.module_path.as_str()).collect();
    assert_eq!(modules, vec!["./ok.css"]);
}

#[test]
fn test_style_import_in_comment_is_ignored() {
    let text = "/* @import 'hidden.css'; */\n@import 'shown.css';";
    let imports = parse_style_imports(text, "/s/main.css");
    assert_eq!(imports.len(), 1);
    assert!(imports.get("./shown.css").is_some());
}

#[test]
fn test_parse_imports_dispatches_on_extension() {
    let styles = vec![".css".to_string(), ".scss".to_string()];
    let style = parse_imports("@import 'a.css';", "/s/main.scss", &styles);
    assert!(style.get("./a.css").is_some());

    let script = parse_imports("import a from './a';", "/s/main.ts", &styles);
    assert_eq!(script.get("./a").unwrap().syntax, ImportSyntax::Script);
}
