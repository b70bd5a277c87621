//! Dashboard handler

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

use crate::services::{DashboardService, StatTile};
use crate::utils::errors::Result;
use super::console::Console;
use super::render_errors;

pub fn render_dashboard(tiles: &[StatTile]) -> String {
    let mut out = String::from("== Dashboard ==\n");
    for tile in tiles {
        out.push_str(&format!("{:<18} {}\n", tile.label, tile.value));
    }
    out
}

/// Fetch and show the dashboard counts
pub async fn show_dashboard<R, W>(console: &mut Console<R, W>, view: &mut DashboardService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = view.load().await {
        debug!(error = %e, "Dashboard loaded with errors");
    }

    if let Some(banner) = render_errors(&view.errors()) {
        console.say(&banner).await?;
    }
    console.say(&render_dashboard(&view.tiles())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TileValue;

    #[test]
    fn test_render_dashboard() {
        let tiles = vec![
            StatTile { label: "Total Students", value: TileValue::Count(3) },
            StatTile { label: "Active Courses", value: TileValue::Pending },
        ];
        let rendered = render_dashboard(&tiles);
        assert!(rendered.contains("Total Students     3"));
        assert!(rendered.contains("Active Courses     -"));
    }
}
