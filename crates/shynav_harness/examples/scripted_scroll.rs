//! Scripted desktop and mobile navbar sessions with tracing output.
//!
//! Run with `RUST_LOG=trace` to see every state transition.

use anyhow::Result;
use shynav_controller::NavbarConfig;
use shynav_harness::{HeadlessPage, PageConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // Desktop session: drift across the 6% threshold and come back.
    let page = HeadlessPage::new(PageConfig {
        height: 1000.0,
        ..Default::default()
    })?;
    let behavior = page.mount(NavbarConfig::default()).expect("navbar present");
    for offset in [20.0, 55.0, 90.0, 200.0, 40.0, 0.0] {
        page.scroll_to(offset);
        page.tick(&behavior);
    }
    let sink = page.sink().expect("navbar present");
    info!(writes = ?sink.borrow().writes, "desktop session");

    // Mobile session: flick down to hide, nudge up to reveal, then focus.
    let page = HeadlessPage::new(PageConfig {
        width: 390.0,
        height: 844.0,
        ..Default::default()
    })?;
    page.scroll_to(120.0);
    let behavior = page.mount(NavbarConfig::default()).expect("navbar present");
    page.scroll_to(400.0);
    page.step(&behavior, 40.0);
    page.scroll_to(360.0);
    page.step(&behavior, 120.0);
    page.focus_navbar();
    let sink = page.sink().expect("navbar present");
    info!(writes = ?sink.borrow().writes, "mobile session");

    Ok(())
}
