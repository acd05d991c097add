use std::error::Error;
use std::path::PathBuf;

use archspan::{layout, render_summary, Session, DEFAULT_LOAD};

/// Read the single required filename argument.
///
/// Refuses a Rust source file: the layout is rewritten on exit, and the only
/// plausible way to point this tool at `.rs` is a shell mistake.
fn layout_path() -> Result<PathBuf, Box<dyn Error>> {
    let path: PathBuf = std::env::args_os()
        .nth(1)
        .ok_or("usage: archspan <layout-file>")?
        .into();
    if path.extension().is_some_and(|extension| extension == "rs") {
        return Err(format!("refusing to overwrite source file {}", path.display()).into());
    }
    Ok(path)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = layout_path()?;

    // Build the bridge from the layout file, falling back to an empty
    // two-support span when the file is missing or malformed.
    let layout = layout::load_or_default(&path);
    let (profile, chain) = layout.into_bridge();

    // Solve the force balance once up front; an unanchored or degenerate
    // layout is a structural error worth failing loudly on.
    let session = Session::new(profile, chain, DEFAULT_LOAD)?;

    // Walk the members and print the force path with stress estimates.
    let report = render_summary(&session.summary());
    print!("{report}");

    // Persist the layout in the same format it was read in. The chain is
    // handed back unconditionally, normalising whatever formatting the
    // input used.
    layout::save(&path, session.profile(), session.chain())?;

    Ok(())
}
