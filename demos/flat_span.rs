use archspan::{ArchProfile, Chain, InputEvent, Key, Session, DEFAULT_LOAD};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let profile = ArchProfile::new(1.0, 1000.0);
    let chain = Chain::new(&[250.0, 500.0, 750.0, 1000.0]);
    let mut session = Session::new(profile, chain, DEFAULT_LOAD)?;

    // Drop one more joint at model x = 400 (pixel 800 on the default canvas).
    session.tick([
        InputEvent::PointerMoved { x: 800, y: 500 },
        InputEvent::KeyDown(Key::Insert),
        InputEvent::KeyUp(Key::Insert),
    ])?;

    print!("{}", archspan::render_summary(&session.summary()));
    Ok(())
}
