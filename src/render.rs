//! Writes a [`MapView`] for the terminal or as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colectivos::view::MapView;
use colectivos::{Origin, Snapshot};
use serde_json::json;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn write(out: &mut impl Write, snapshot: &Snapshot, view: &MapView, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let doc = json!({
                "origin": snapshot.origin,
                "total": snapshot.vehicles.len(),
                "view": view,
            });
            serde_json::to_writer_pretty(&mut *out, &doc).context("serializing view")?;
            writeln!(out)?;
        }
        Format::Text => text(out, snapshot, view)?,
    }
    out.flush().context("flushing output")
}

fn text(out: &mut impl Write, snapshot: &Snapshot, view: &MapView) -> Result<()> {
    let origin = match snapshot.origin {
        Origin::Live => "live",
        Origin::Fallback => "fallback",
    };
    writeln!(
        out,
        "showing {} of {} vehicles ({origin} data)",
        view.markers.len(),
        snapshot.vehicles.len()
    )?;

    if !view.chips.is_empty() {
        let labels: Vec<_> = view.chips.iter().map(|c| c.label.as_str()).collect();
        writeln!(out, "filters: {}", labels.join(" | "))?;
    }
    if let Some(overlay) = &view.overlay {
        writeln!(
            out,
            "radius: {} m around {:.5}, {:.5}",
            overlay.radius_m, overlay.center.latitude, overlay.center.longitude
        )?;
    }

    for m in &view.markers {
        writeln!(
            out,
            "{:<6} {:<8} {:>10.5}, {:>10.5}  {:>4} min ago  {}",
            m.route_short_name,
            m.id,
            m.position.latitude,
            m.position.longitude,
            m.minutes_ago,
            m.trip_headsign
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use colectivos::view::Icon;
    use colectivos::{FilterInput, FilterState};
    use pretty_assertions::assert_eq;

    use super::*;

    fn rendered(filter: &FilterState, format: Format) -> String {
        let snapshot = Snapshot::fallback();
        let now = Utc.timestamp_opt(1_713_196_800 + 300, 0).unwrap();
        let view = MapView::build(&snapshot.vehicles, filter, now, Icon::default());

        let mut out = vec![];
        write(&mut out, &snapshot, &view, format).expect("should render");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn text_with_route_filter() {
        let filter = FilterState::from_input(&FilterInput {
            route: "152".to_string(),
            ..FilterInput::default()
        });

        assert_eq!(
            rendered(&filter, Format::Text),
            "showing 2 of 8 vehicles (fallback data)\n\
             filters: Route: 152\n\
             152A   3321      -34.60952,  -58.44812     5 min ago  a Olivos\n\
             152B   3345      -34.61433,  -58.45210     5 min ago  a La Boca\n"
        );
    }

    #[test]
    fn text_with_radius() {
        let filter = FilterState::from_input(&FilterInput {
            route: String::new(),
            latitude: "-34.61".to_string(),
            longitude: "-58.45".to_string(),
        });
        let text = rendered(&filter, Format::Text);

        assert!(text.contains("radius: 1000 m around -34.61000, -58.45000\n"));
        assert!(text.contains("filters: Latitude: -34.61 | Longitude: -58.45\n"));
    }

    #[test]
    fn json_document() {
        let json: serde_json::Value =
            serde_json::from_str(&rendered(&FilterState::default(), Format::Json))
                .expect("valid json");

        assert_eq!(json["origin"], "fallback");
        assert_eq!(json["total"], 8);
        assert_eq!(json["view"]["markers"].as_array().map(Vec::len), Some(8));
        assert_eq!(json["view"]["zoom"], 12);
    }
}
