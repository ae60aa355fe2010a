//! Command-line driver for Inkleaf.
//!
//! Loads a document's persisted annotations from a JSON record store,
//! optionally replays a gesture script against an annotation canvas, saves
//! the newly committed strokes and exports one page as SVG.

pub mod config;
pub mod error_adapter;
pub mod script;
pub mod store;

mod args;

use std::{fs, time::Instant};

use log::info;

pub use args::Args;
use inkleaf::{InkleafError, PageRenderer, persist::SaveBatcher};
use script::Script;
use store::RecordStore;

/// Run the Inkleaf CLI with the given arguments.
pub fn run(args: &Args) -> Result<(), InkleafError> {
    info!(
        input_path = args.input.as_str(),
        output_path = args.output.as_str(),
        pdf_id = args.pdf_id,
        page = args.page;
        "Processing annotations"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::with_surface_size(app_config, args.width, args.height)?;

    let mut store = RecordStore::open(&args.input)?;
    let renderer = PageRenderer::new(app_config);
    let mut canvas = renderer.canvas()?;

    let summary = canvas.load(store.records_for(args.pdf_id));
    canvas.set_page(args.page);

    let mut batcher = SaveBatcher::default();
    if let Some(script_path) = &args.script {
        let script = Script::load(script_path)?;
        for stroke in script.replay(&mut canvas)? {
            batcher.push(stroke, Instant::now());
        }
    }

    if args.save && !batcher.is_empty() {
        let batch = batcher.flush();
        for stroke in &batch {
            store.append(args.pdf_id, stroke)?;
        }
        store.save()?;
        info!(saved = batch.len(); "Committed strokes persisted");
    }

    canvas.set_page(args.page);
    canvas.decode_pending_images();

    let svg = canvas.surface().to_svg_string();
    fs::write(&args.output, svg)?;

    info!(
        output_file = args.output.as_str(),
        loaded = summary.loaded,
        skipped = summary.skipped,
        strokes = canvas.store().page(args.page).len();
        "SVG exported successfully"
    );

    Ok(())
}
