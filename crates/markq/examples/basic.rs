//! Example: load a few documents and query them

use anyhow::Result;
use markq::{class_predicate, get_all, get_first, Flow, Loader, ParseOptions, XPathIndex};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=markq=debug for load details)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let loader = Loader::new()
        .with_options(ParseOptions::NO_BLANKS)
        .with_charset("UTF-8");

    let doc = loader.load(
        r#"<!DOCTYPE html>
        <ul id="menu">
          <li class="entry active">Home</li>
          <li class="entry">About</li>
          <li class="entry-disabled">Admin</li>
        </ul>"#,
    )?;

    let index = XPathIndex::new(&doc);
    let menu = get_first(&index, "//ul[@id='menu']", None)?;
    let query = format!("li[{}]", class_predicate("entry"));
    for item in get_all(&index, &query, Some(menu.as_node()))? {
        println!("entry: {}", item.text_content());
    }

    let pages = ["<p>fine</p>", "<p><broken", "<p>never loaded</p>"];
    let loaded = loader.process(pages, |doc, diagnostics, fatal| {
        println!(
            "{:?}: {} diagnostics, fatal = {}",
            doc.root().text_content(),
            diagnostics.len(),
            fatal
        );
        if fatal { Flow::Stop } else { Flow::Continue }
    });
    println!("processed {loaded} of {} documents", pages.len());

    if let Err(err) = loader.load("<p><broken") {
        println!("load failed: {err}");
    }
    Ok(())
}
