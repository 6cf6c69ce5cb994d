//! Pipeline integration tests.
//!
//! End-to-end tests for analyze -> resolve -> consolidate over an in-memory
//! directory tree.

use pretty_assertions::assert_eq;
use srcweave_engine::{EngineError, Project};
use srcweave_options::EngineOptions;
use srcweave_resolver::MemoryDirectoryLister;

fn tree() -> MemoryDirectoryLister {
    MemoryDirectoryLister::from_files([
        "/app/src/main.tsx",
        "/app/src/pages/home.tsx",
        "/app/src/components/Button.tsx",
        "/app/src/components/Button.js",
        "/app/src/utils/index.ts",
        "/app/src/styles/main.css",
        "/app/src/styles/theme.css",
    ])
}

fn project() -> Project {
    let mut options = EngineOptions::default();
    options.callees.push("defineArgs".to_string());
    let mut project = Project::new(vec![], options);
    project.add_source(
        "/app/src/main.tsx",
        "import React from 'react';\n\
         import Button from './components/Button';\n\
         import * as utils from './utils';\n\
         import type { Props } from './types';\n\
         export const args = defineArgs({ label: 'Main' });\n",
    );
    project.add_source(
        "/app/src/pages/home.tsx",
        "import React, { useState } from 'react';\n\
         import Button from '../components/Button';\n\
         import { Button as Other } from '../missing';\n",
    );
    project.add_source("/app/src/styles/main.css", "@import 'theme.css';\n");
    project
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_analyze_keeps_file_order() {
    let files = project().analyze();
    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["/app/src/main.tsx", "/app/src/pages/home.tsx", "/app/src/styles/main.css"]
    );
    assert_eq!(files[0].imports.len(), 4);
    assert_eq!(files[0].call_sites.len(), 1);
    assert!(files[1].call_sites.is_empty());
    assert!(files[2].imports.get("./theme.css").is_some());
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_run_resolves_relative_imports() {
    let output = project().run(tree());
    let main = &output.files[0].imports;
    assert_eq!(
        main.get("./components/Button").unwrap().resolved_path.as_deref(),
        Some("/app/src/components/Button.tsx")
    );
    assert_eq!(
        main.get("./utils").unwrap().resolved_path.as_deref(),
        Some("/app/src/utils/index.ts")
    );
    assert_eq!(main.get("react").unwrap().resolved_path, None);
    assert_eq!(
        output.files[2].imports.get("./theme.css").unwrap().resolved_path.as_deref(),
        Some("/app/src/styles/theme.css")
    );
}

#[test]
fn test_run_reports_unresolved() {
    let output = project().run(tree());
    let unresolved: Vec<&str> = output.unresolved().iter().map(|e| e.specifier()).collect();
    assert_eq!(unresolved, vec!["/app/src/types", "/app/src/missing"]);
}

#[test]
fn test_run_consolidates_across_files() {
    let output = project().run(tree());
    assert_eq!(
        output.plan.render_statements(),
        vec![
            "import React, { useState } from 'react';",
            "import Button from '/app/src/components/Button.tsx';",
            "import * as utils from '/app/src/utils/index.ts';",
            "import { Button as Other } from '/app/src/missing';",
            "import '/app/src/styles/theme.css';",
        ]
    );
    assert!(output.provider.contains("export const modules = {\n"));
    assert!(output.provider.contains("  '/app/src/utils/index.ts': utils,\n"));
}

#[test]
fn test_reserved_names_from_options() {
    let mut project = project();
    project.options.reserved_names.push("React".to_string());
    project.options.provider_export_name = "registry".to_string();
    let output = project.run(tree());
    assert_eq!(
        output.plan.render_statements()[0],
        "import React_react, { useState } from 'react';"
    );
    assert!(output.provider.contains("export const registry = {"));
}

#[test]
fn test_run_batches_directory_listings() {
    let lister = tree();
    project().run(&lister);
    // /app/src, /app/src/components and /app/src/styles, plus the index
    // probe of /app/src/utils.
    assert_eq!(lister.listings(), 4);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_root_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    std::fs::write(&file, "import x from './x';").unwrap();

    let mut project = Project::new(vec![file.to_string_lossy().to_string()], EngineOptions::default());
    project.load_root_files().unwrap();
    assert_eq!(project.source_count(), 1);
    assert_eq!(project.analyze()[0].imports.len(), 1);
}

#[test]
fn test_load_missing_root_file() {
    let mut project = Project::new(vec!["/definitely/not/here.ts".to_string()], EngineOptions::default());
    assert!(matches!(project.load_root_files(), Err(EngineError::Io { .. })));
}

#[test]
fn test_configured_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.json");
    std::fs::write(&config, r#"{ "providerExportName": "table" }"#).unwrap();

    let project = Project::configured(vec![], Some(&config), dir.path()).unwrap();
    assert_eq!(project.options.provider_export_name, "table");

    std::fs::write(&config, "not json").unwrap();
    assert!(matches!(
        Project::configured(vec![], Some(&config), dir.path()),
        Err(EngineError::Options(_))
    ));
}
