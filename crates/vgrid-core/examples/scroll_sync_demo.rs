use tracing_subscriber::EnvFilter;
use vgrid_core::{
    GridConfig, GridEngine, HostMetrics, Key, Modifiers, ScrollCommand, ScrollRegion,
};

const VIEWPORT_HEIGHT: f64 = 800.0;
const VIEWPORT_WIDTH: f64 = 1200.0;

/// Stand-in for the DOM: applies commands and reports which regions the host
/// would fire scroll events for.
fn apply(commands: &[ScrollCommand]) -> Vec<(ScrollRegion, f64)> {
    let mut echoes = Vec::new();
    for command in commands {
        println!("  -> {:?}", command);
        if let ScrollCommand::SetScrollLeft { region, offset } = command {
            echoes.push((*region, *offset));
        }
    }
    echoes
}

fn replay_echoes(engine: &mut GridEngine, echoes: Vec<(ScrollRegion, f64)>) {
    for (region, offset) in echoes {
        let commands = match region {
            ScrollRegion::Body => engine.notify_body_scroll(offset, engine.rows().scroll_offset()),
            ScrollRegion::Header => engine.notify_header_scroll(offset),
            ScrollRegion::Bar => engine.notify_synthetic_bar_scroll(offset),
        };
        println!("  echo from {:?} produced {} writes", region, commands.len());
    }
}

fn main() {
    // RUST_LOG=vgrid_core=trace shows the sync passes
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut engine = match GridEngine::new(GridConfig::with_dimensions(200, 100)) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("failed to create grid: {}", err);
            return;
        }
    };

    println!("=== Resize ===");
    apply(&engine.notify_resize(HostMetrics {
        body_scroll_width: 18_800.0,
        body_client_width: VIEWPORT_WIDTH,
        vertical_offset_width: VIEWPORT_WIDTH + 15.0,
        vertical_client_width: VIEWPORT_WIDTH,
    }));
    apply(&engine.apply_pending_corrections());
    println!("content width incl. gap: {}", engine.content_width_with_gap());

    println!("\n=== Vertical scroll to 4400px ===");
    apply(&engine.notify_body_scroll(0.0, 4400.0));
    println!(
        "rows {:?}, columns {:?}",
        engine.row_visible_range(VIEWPORT_HEIGHT),
        engine.column_visible_range(VIEWPORT_WIDTH)
    );

    println!("\n=== Drag the synthetic bar ===");
    let echoes = apply(&engine.notify_synthetic_bar_scroll(3_000.0));
    replay_echoes(&mut engine, echoes);
    apply(&engine.apply_pending_corrections());
    println!("columns {:?}", engine.column_visible_range(VIEWPORT_WIDTH));

    println!("\n=== Drag the bar to the end ===");
    let echoes = apply(&engine.notify_synthetic_bar_scroll(17_600.0));
    replay_echoes(&mut engine, echoes);
    apply(&engine.apply_pending_corrections());

    println!("\n=== Edit C6 and Tab across ===");
    engine.start_edit(5, 2);
    println!("mode: {:?}", engine.mode());
    engine.handle_key(5, 2, Key::Tab, Modifiers::new(), "hello");
    println!("C6 = {:?}, mode: {:?}", engine.cell_text(5, 2), engine.mode());
    engine.handle_key(5, 3, Key::Escape, Modifiers::new(), "ignored");
    println!("D6 = {:?}, mode: {:?}", engine.cell_text(5, 3), engine.mode());
}
