//! Common fixtures for the Antoinette test suites
//!
//! Shared project trees and small helpers used by both the unit and the
//! integration suites.

// Allow dead code because not every suite uses every helper
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::Path;

use antoinette_cli::test_utils::TestProject;
use antoinette_cli::weaver::Bundle;

/// `(components, templates)` of each bundle, in bundle order.
///
/// Names are left out so results from different namers compare equal.
pub fn bundle_sets(bundles: &[Bundle]) -> Vec<(Vec<String>, Vec<String>)> {
    bundles.iter().map(|b| (b.components.clone(), b.templates.clone())).collect()
}

/// Owned string vector from literals.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Command for the `antoinette` binary rooted at `root`, with logging off.
pub fn antoinette(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("antoinette").expect("binary is built for integration tests");
    cmd.arg("--quiet").arg("--root").arg(root).env_remove("ANTOINETTE_CONFIG");
    cmd
}

/// A small shop application exercising pages, partials and layouts.
///
/// - `cases/new` and `cases/show` use `CaseBuilder` and `SearchForm`
/// - `eurorack_modules/show` uses `PanelGallery`
/// - `cases/index` and `users/show` render `cases/_baby_case`, which uses
///   `BabyCaseBuilder`
/// - `posts/show` declares the `blog` layout, which uses `BlogWidget`
/// - the `application` layout uses `NavSidebar`
pub fn shop_project() -> Result<TestProject> {
    TestProject::builder()?
        .with_layout("application", "<body><%= yield %><script>Elm.NavSidebar.init()</script></body>")
        .with_layout("blog", "<body><%= yield %><script>Elm.BlogWidget.init()</script></body>")
        .with_view(
            "cases/new.html.erb",
            "<script>Elm.CaseBuilder.init(); Elm.SearchForm.init();</script>",
        )
        .with_view(
            "cases/show.html.erb",
            "<script>\n  Elm.SearchForm.init();\n  Elm.CaseBuilder\n    .init();\n</script>",
        )
        .with_view("eurorack_modules/show.html.erb", "<script>Elm.PanelGallery.init()</script>")
        .with_view("cases/index.html.erb", "<h1>Cases</h1>\n<%= render \"baby_case\" %>")
        .with_view("users/show.html.erb", "<%= render partial: \"cases/baby_case\" %>")
        .with_view("cases/_baby_case.html.erb", "<script>Elm.BabyCaseBuilder.init()</script>")
        .with_view("posts/show.html.erb", "---\nlayout: blog\n---\n<script>Elm.Comments.init()</script>")
        .with_view("about.html.erb", "<p>No components here</p>")
        .build()
}
