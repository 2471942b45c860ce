//! Diagnostic HTML rendering of rasterization results.
//!
//! Produces a self-contained Leaflet page outlining the polygon and drawing
//! every emitted cell, for eyeballing how a shape was cut. Only the test
//! suite consumes this; nothing in the geometry core depends on it.

use std::fs;
use std::io;
use std::path::Path;

use crate::geohash;
use crate::raster::CellCover;
use gridfence_types::GeoPolygon;

/// Render a polygon and its cell cover as a standalone HTML page.
///
/// Fully-inside cells are drawn solid, boundary cells dashed. Cells whose
/// hash fails to decode are skipped.
pub fn render_cover_html(polygon: &GeoPolygon, cover: &CellCover, title: &str) -> String {
    let center = polygon.bounds().mid_point();

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(
        "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\"/>\n\
         <script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n\
         <style>html,body,#map{height:100%;margin:0}</style>\n\
         </head>\n<body>\n<div id=\"map\"></div>\n<script>\n",
    );
    html.push_str(&format!(
        "var map = L.map('map').setView([{},{}], 12);\n",
        center.lat, center.lng
    ));
    html.push_str(
        "L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png').addTo(map);\n",
    );

    html.push_str("var ring = [");
    for p in polygon.points() {
        html.push_str(&format!("[{},{}],", p.lat, p.lng));
    }
    html.push_str("];\nL.polygon(ring, {color:'red', fill:false, weight:2}).addTo(map);\n");

    for hash in &cover.inside {
        push_cell(&mut html, hash, "{color:'#3366cc', weight:1, fillOpacity:0.25}");
    }
    for hash in &cover.boundary {
        push_cell(
            &mut html,
            hash,
            "{color:'#3366cc', weight:1, dashArray:'4', fillColor:'#F0F8FF', fillOpacity:0.5}",
        );
    }

    html.push_str("</script>\n</body>\n</html>\n");
    html
}

/// Render and write the page to `path`.
pub fn write_cover_html(
    path: &Path,
    polygon: &GeoPolygon,
    cover: &CellCover,
    title: &str,
) -> io::Result<()> {
    fs::write(path, render_cover_html(polygon, cover, title))
}

fn push_cell(html: &mut String, hash: &str, style: &str) {
    let Some(cell) = geohash::decode(hash) else {
        return;
    };
    html.push_str(&format!(
        "L.rectangle([[{},{}],[{},{}]], {}).addTo(map); // {}\n",
        cell.min_lat, cell.min_lng, cell.max_lat, cell.max_lng, style, hash
    ));
}
