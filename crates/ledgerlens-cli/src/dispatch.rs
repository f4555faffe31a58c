use ledgerlens_client::commands;
use ledgerlens_client::{ClientResult, SuccessEnvelope, SummaryView};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Dashboard { path, .. } => {
            commands::summary::run(SummaryView::Dashboard, path.clone())
        }
        Commands::Analysis { path, .. } => {
            commands::summary::run(SummaryView::Analysis, path.clone())
        }
    }
}
