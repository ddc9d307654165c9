use anyhow::Result;

use antoinette_cli::artifact::to_canonical;
use antoinette_cli::config::ConfigRecord;
use antoinette_cli::layouts::{LayoutLookup, LayoutResolver};
use antoinette_cli::partials::{PartialLookup, PartialResolver};
use antoinette_cli::test_utils::{TestProject, init_test_logging};
use antoinette_cli::usage::PageInventory;
use antoinette_cli::weaver::{SequentialNamer, weave_project};

use crate::common::{bundle_sets, shop_project, strings};

#[test]
fn test_shop_project_bundles() -> Result<()> {
    init_test_logging(None);
    let project = shop_project()?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(
        bundle_sets(&bundles),
        vec![
            (
                strings(&["CaseBuilder", "NavSidebar", "SearchForm"]),
                strings(&["app/views/cases/new.html.erb", "app/views/cases/show.html.erb"]),
            ),
            (
                strings(&["BabyCaseBuilder", "NavSidebar"]),
                strings(&["app/views/cases/index.html.erb", "app/views/users/show.html.erb"]),
            ),
            (strings(&["BlogWidget", "Comments"]), strings(&["app/views/posts/show.html.erb"])),
            (
                strings(&["NavSidebar", "PanelGallery"]),
                strings(&["app/views/eurorack_modules/show.html.erb"]),
            ),
        ]
    );
    let names: Vec<&str> = bundles.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["bundle-001", "bundle-002", "bundle-003", "bundle-004"]);
    Ok(())
}

#[test]
fn test_stages_agree_on_paths() -> Result<()> {
    let project = shop_project()?;
    let layout = project.layout();

    let inventory = PageInventory::scan(&layout)?;
    let partials = PartialResolver::scan(&layout)?;
    let layouts = LayoutResolver::scan(&layout)?;

    assert!(inventory.views().iter().all(|v| v.path.starts_with("app/views/")));
    assert!(inventory.views().iter().all(|v| !v.path.contains("layouts")));
    assert_eq!(
        partials.resolve("cases/_baby_case.html.erb"),
        strings(&["app/views/cases/index.html.erb", "app/views/users/show.html.erb"])
    );
    assert_eq!(layouts.layout_for("app/views/posts/show.html.erb"), "blog");
    assert_eq!(layouts.components_for("app/views/about.html.erb"), strings(&["NavSidebar"]));
    Ok(())
}

#[test]
fn test_fragment_reached_through_fragment() -> Result<()> {
    let project = TestProject::builder()?
        .with_view("home.html.erb", "<%= render \"shared/sidebar\" %>")
        .with_view("shared/_sidebar.html.erb", "<%= render \"shared/rating\" %>")
        .with_view("shared/_rating.html.erb", "Elm.Stars.init()")
        .with_view("shared/_unused.html.erb", "Elm.Orphan.init()")
        .build()?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(bundle_sets(&bundles), vec![(strings(&["Stars"]), strings(&["app/views/home.html.erb"]))]);
    Ok(())
}

#[test]
fn test_custom_view_paths_add_pages_and_layouts() -> Result<()> {
    let project = TestProject::builder()?
        .with_layout("application", "Elm.NavSidebar.init()")
        .with_file("app/content/layouts/application.html.erb", "Elm.CookieBanner.init()")
        .with_file("app/content/pages/pricing.html.erb", "Elm.PriceTable.init()")
        .with_custom_view_path("app/content/pages")
        .with_custom_view_path("app/content/layouts")
        .build()?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(
        bundle_sets(&bundles),
        vec![(
            strings(&["CookieBanner", "NavSidebar", "PriceTable"]),
            strings(&["app/content/pages/pricing.html.erb"]),
        )]
    );
    Ok(())
}

#[test]
fn test_fragment_rendered_by_layout_reaches_wrapped_pages() -> Result<()> {
    let project = TestProject::builder()?
        .with_layout("application", "<body><%= render \"shared/nav\" %><%= yield %></body>")
        .with_view("shared/_nav.html.erb", "<script>Elm.Nav.init()</script>")
        .with_view("home.html.erb", "<script>Elm.Search.init()</script>")
        .build()?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(
        bundle_sets(&bundles),
        vec![(strings(&["Nav", "Search"]), strings(&["app/views/home.html.erb"]))]
    );
    assert!(bundles.iter().flat_map(|b| &b.templates).all(|t| !t.contains("layouts")));
    Ok(())
}

#[test]
fn test_custom_path_page_gets_rendered_partial() -> Result<()> {
    let project = TestProject::builder()?
        .with_file(
            "app/content/pages/pricing.html.erb",
            "<script>Elm.PriceTable.init()</script><%= render \"shared/card\" %>",
        )
        .with_view("shared/_card.html.erb", "<script>Elm.Card.init()</script>")
        .with_custom_view_path("app/content")
        .build()?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(
        bundle_sets(&bundles),
        vec![(strings(&["Card", "PriceTable"]), strings(&["app/content/pages/pricing.html.erb"]))]
    );
    Ok(())
}

#[test]
fn test_custom_path_outside_root_with_underscored_parent() -> Result<()> {
    let outside = tempfile::TempDir::new()?;
    let views = outside.path().join("_ci").join("views");
    std::fs::create_dir_all(&views)?;
    std::fs::write(views.join("status.html.erb"), "<script>Elm.Status.init()</script>")?;
    let views_root = views.to_string_lossy().replace('\\', "/");

    let project = TestProject::builder()?.with_custom_view_path(views_root.clone()).build()?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(
        bundle_sets(&bundles),
        vec![(strings(&["Status"]), vec![format!("{views_root}/status.html.erb")])]
    );
    Ok(())
}

#[test]
fn test_custom_namespace_and_extra_layout_dir() -> Result<()> {
    let project = TestProject::builder()?
        .with_file("app/themes/dark.html.erb", "<script>Widgets.ThemeToggle.init()</script>")
        .with_view(
            "home.html.erb",
            "---\nlayout: dark\n---\n<script>Widgets.Search.init(); Elm.Legacy.init()</script>",
        )
        .build()?;
    let layout = project.layout().with_namespace("Widgets").with_layout_dir("app/themes");

    let bundles = weave_project(&layout, &mut SequentialNamer::default())?;

    assert_eq!(
        bundle_sets(&bundles),
        vec![(strings(&["Search", "ThemeToggle"]), strings(&["app/views/home.html.erb"]))]
    );
    Ok(())
}

#[test]
fn test_unreadable_template_is_skipped() -> Result<()> {
    let project = TestProject::builder()?
        .with_view("good.html.erb", "Elm.Good.init()")
        .build()?;
    std::fs::write(project.root.join("app/views/binary.html.erb"), [0xff, 0xfe, 0x00, 0x45])?;

    let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;

    assert_eq!(bundle_sets(&bundles), vec![(strings(&["Good"]), strings(&["app/views/good.html.erb"]))]);
    Ok(())
}

#[test]
fn test_repeated_runs_produce_identical_documents() -> Result<()> {
    let project = shop_project()?;

    let render = || -> Result<String> {
        let bundles = weave_project(&project.layout(), &mut SequentialNamer::default())?;
        Ok(to_canonical(bundles, ConfigRecord::default()).to_json()?)
    };

    assert_eq!(render()?, render()?);
    Ok(())
}

#[test]
fn test_empty_project_has_no_bundles() -> Result<()> {
    let project = TestProject::builder()?.with_view("index.html.erb", "<p>static</p>").build()?;

    assert!(weave_project(&project.layout(), &mut SequentialNamer::default())?.is_empty());
    assert!(PageInventory::scan(&project.layout())?.is_empty());
    Ok(())
}
