use std::collections::{BTreeMap, BTreeSet};

use antoinette_cli::layouts::{LayoutLookup, NoLayouts};
use antoinette_cli::usage::UsageGroup;
use antoinette_cli::weaver::{Bundle, SequentialNamer, Weaver};

use crate::common::{bundle_sets, strings};

/// Layout components keyed by template directory.
struct LayoutByDirectory(BTreeMap<&'static str, Vec<String>>);

impl LayoutLookup for LayoutByDirectory {
    fn components_for(&self, template_path: &str) -> Vec<String> {
        self.0
            .iter()
            .find(|(dir, _)| template_path.starts_with(*dir))
            .map(|(_, components)| components.clone())
            .unwrap_or_default()
    }
}

fn group(components: &[&str], templates: &[&str]) -> UsageGroup {
    UsageGroup {
        components: strings(components),
        templates: strings(templates),
    }
}

fn groups() -> Vec<UsageGroup> {
    vec![
        group(&["CaseBuilder", "SearchForm"], &["cases/new.html.erb", "cases/show.html.erb"]),
        group(&["SearchForm"], &["admin/search.html.erb", "search.html.erb"]),
        group(&["Stars"], &["shared/_rating.html.erb"]),
        group(&["Chart"], &["admin/_chart.html.erb"]),
        group(&["PanelGallery"], &["eurorack_modules/show.html.erb"]),
    ]
}

fn partials() -> BTreeMap<String, Vec<String>> {
    let mut partials = BTreeMap::new();
    partials.insert("shared/_rating.html.erb".to_string(), strings(&["cases/show.html.erb", "search.html.erb"]));
    partials.insert("admin/_chart.html.erb".to_string(), strings(&["admin/_panel.html.erb"]));
    partials.insert("admin/_panel.html.erb".to_string(), strings(&["admin/search.html.erb"]));
    partials
}

fn layouts() -> LayoutByDirectory {
    let mut by_dir = BTreeMap::new();
    by_dir.insert("admin/", strings(&["AdminNav"]));
    by_dir.insert("cases/", strings(&["SearchForm"]));
    LayoutByDirectory(by_dir)
}

fn weave() -> Vec<Bundle> {
    let partials = partials();
    let layouts = layouts();
    Weaver::new(groups(), &partials, &layouts)
        .with_views_prefix("")
        .weave(&mut SequentialNamer::default())
}

#[test]
fn test_every_template_in_exactly_one_bundle() {
    let bundles = weave();

    let mut seen = BTreeSet::new();
    for bundle in &bundles {
        for template in &bundle.templates {
            assert!(seen.insert(template.clone()), "{template} appears twice");
        }
    }

    let expected: BTreeSet<String> = strings(&[
        "admin/search.html.erb",
        "cases/new.html.erb",
        "cases/show.html.erb",
        "eurorack_modules/show.html.erb",
        "search.html.erb",
    ])
    .into_iter()
    .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_component_sets_are_distinct_and_sorted() {
    let bundles = weave();

    let sets: BTreeSet<&Vec<String>> = bundles.iter().map(|b| &b.components).collect();
    assert_eq!(sets.len(), bundles.len());

    for bundle in &bundles {
        let mut sorted = bundle.components.clone();
        sorted.sort();
        assert_eq!(bundle.components, sorted);
        let mut templates = bundle.templates.clone();
        templates.sort();
        assert_eq!(bundle.templates, templates);
        assert!(!bundle.templates.is_empty());
    }
}

#[test]
fn test_resolved_sets() {
    let bundles = weave();
    let find = |template: &str| {
        bundles
            .iter()
            .find(|b| b.templates.iter().any(|t| t == template))
            .map(|b| b.components.clone())
            .unwrap_or_default()
    };

    assert_eq!(find("cases/new.html.erb"), strings(&["CaseBuilder", "SearchForm"]));
    assert_eq!(find("cases/show.html.erb"), strings(&["CaseBuilder", "SearchForm", "Stars"]));
    assert_eq!(find("search.html.erb"), strings(&["SearchForm", "Stars"]));
    assert_eq!(find("admin/search.html.erb"), strings(&["AdminNav", "Chart", "SearchForm"]));
    assert_eq!(find("eurorack_modules/show.html.erb"), strings(&["PanelGallery"]));
}

#[test]
fn test_bundles_ordered_by_size_then_name() {
    let bundles = weave();

    for pair in bundles.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.components.len() > b.components.len()
                || (a.components.len() == b.components.len() && a.name < b.name)
        );
    }
}

#[test]
fn test_weaving_is_repeatable() {
    let first = weave();
    let second = weave();

    assert_eq!(first, second);
    assert_eq!(bundle_sets(&first), bundle_sets(&second));
}

#[test]
fn test_no_layouts_keeps_own_sets() {
    let partials: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let bundles = Weaver::new(
        vec![group(&["PanelGallery"], &["eurorack_modules/show.html.erb"])],
        &partials,
        &NoLayouts,
    )
    .weave(&mut SequentialNamer::new("pack"));

    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].name, "pack-001");
    assert_eq!(bundles[0].components, strings(&["PanelGallery"]));
}
