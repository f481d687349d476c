use anyhow::{anyhow, Result};
use clap::Parser;

use ng_emmet::cli::CliArgs;
use ng_emmet::config::EditorConfig;
use ng_emmet::context::line_info;
use ng_emmet::expand::HtmlExpander;
use ng_emmet::model::{Document, Editor};
use ng_emmet::update::update;

fn main() -> Result<()> {
    ng_emmet::tracing::init();

    let args = CliArgs::parse();
    let config = EditorConfig::load();
    let run = args.into_run(&config).map_err(|e| anyhow!(e))?;

    let mut document = Document::from_file(run.path.clone())?;
    if let Some(language) = run.language {
        document.language = language;
    }

    let mut editor = Editor::new(document, run.indent);
    editor.selection = run.selection;
    editor.clamp_selection();

    if run.inspect {
        let info = line_info(&editor, editor.selection, config.match_policy);
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let outcome = update(&mut editor, &HtmlExpander, &config, run.msg)?;
    tracing::info!(?outcome, path = %run.path.display(), "cycle finished");

    if run.write {
        if editor.document.is_modified {
            editor.document.save()?;
        }
    } else {
        print!("{}", editor.text());
    }
    Ok(())
}
