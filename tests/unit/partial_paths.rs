use antoinette_cli::partials::{InclusionScanner, normalize_partial_path};

const EXT: &str = ".html.erb";

#[test]
fn test_underscore_normalization_round_trip() {
    assert_eq!(normalize_partial_path("shared/card", None, EXT), "shared/_card.html.erb");
    assert_eq!(normalize_partial_path("shared/_card", None, EXT), "shared/_card.html.erb");
}

#[test]
fn test_bare_name_uses_including_directory() {
    assert_eq!(
        normalize_partial_path("row", Some("admin/reports/index.html.erb"), EXT),
        "admin/reports/_row.html.erb"
    );
}

#[test]
fn test_both_directive_forms_in_one_template() -> anyhow::Result<()> {
    let scanner = InclusionScanner::new(EXT)?;
    let content = r#"
<%= render partial: 'shared/header', locals: { title: "Cases" } %>
<% @cases.each do |c| %>
  <%= render "row", case: c %>
<% end %>
<%= render("shared/footer") %>
"#;

    let mut paths = scanner.extract_partial_paths(content, Some("cases/index.html.erb"));
    paths.sort();

    assert_eq!(
        paths,
        vec!["cases/_row.html.erb", "shared/_footer.html.erb", "shared/_header.html.erb"]
    );
    Ok(())
}
