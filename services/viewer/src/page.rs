//! The embedded single-page UI.
//!
//! The page keeps no server-side state: every control change rebuilds the
//! query string and refetches /map and /legend. Coastlines and borders
//! come from the basemap tiles; the data PNG is stretched over its
//! bounding box as a translucent overlay.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>GFS Spatial Viewer</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  body { margin: 0; font-family: system-ui, sans-serif; background: #f4f5f7; }
  #controls {
    display: flex; flex-wrap: wrap; gap: 12px; align-items: end;
    padding: 10px 16px; background: #fff; border-bottom: 1px solid #ddd;
  }
  #controls label { display: flex; flex-direction: column; font-size: 12px; color: #444; }
  #controls input, #controls select { margin-top: 2px; padding: 3px 5px; }
  #controls input[type=number] { width: 5.5em; }
  #status { padding: 6px 16px; font-size: 14px; min-height: 1.3em; }
  #status.error { color: #b00020; }
  #map { height: 65vh; }
  #legend { display: block; margin: 10px auto; max-width: 640px; width: 100%; }
</style>
</head>
<body>
<div id="controls">
  <label>Run date <input type="date" id="date"></label>
  <label>Run hour
    <select id="hour">
      <option value="00">00z</option><option value="06">06z</option>
      <option value="12">12z</option><option value="18">18z</option>
    </select>
  </label>
  <label>Parameter <select id="param"></select></label>
  <label>Forecast step <input type="number" id="step" min="0" max="240" value="0"></label>
  <label>Lat min <input type="number" id="lat_min" min="-90" max="90" step="5" value="-15"></label>
  <label>Lat max <input type="number" id="lat_max" min="-90" max="90" step="5" value="15"></label>
  <label>Lon min <input type="number" id="lon_min" min="0" max="360" step="5" value="90"></label>
  <label>Lon max <input type="number" id="lon_max" min="0" max="360" step="5" value="150"></label>
</div>
<div id="status"></div>
<div id="map"></div>
<img id="legend" alt="legend">
<script>
"use strict";

const map = L.map('map');
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

let overlay = null;
// Monotonic request id; responses from superseded requests are dropped.
let requestSeq = 0;

const el = id => document.getElementById(id);
const controls = ['date', 'hour', 'param', 'step', 'lat_min', 'lat_max', 'lon_min', 'lon_max'];

function setStatus(text, isError) {
  const s = el('status');
  s.textContent = text;
  s.className = isError ? 'error' : '';
}

function queryString() {
  const q = new URLSearchParams();
  for (const id of controls) {
    const v = el(id).value;
    if (v !== '') q.set(id, v);
  }
  return q.toString();
}

async function refresh() {
  const seq = ++requestSeq;
  const qs = queryString();
  setStatus(`Loading data from GFS ${el('date').value} ${el('hour').value}z ...`, false);

  try {
    const resp = await fetch('/map?' + qs);
    if (seq !== requestSeq) return; // a newer selection superseded this one
    if (!resp.ok) {
      setStatus(await resp.text(), true);
      return;
    }
    const blob = await resp.blob();
    if (seq !== requestSeq) return;

    const south = parseFloat(el('lat_min').value);
    const north = parseFloat(el('lat_max').value);
    const west = parseFloat(el('lon_min').value);
    const east = parseFloat(el('lon_max').value);
    // Leaflet uses -180..180; shift the 0-360 values past the antimeridian
    const toLeaflet = lon => lon > 180 ? lon - 360 : lon;
    let w = toLeaflet(west), e = toLeaflet(east);
    if (e < w) e += 360; // window straddles the antimeridian
    const bounds = [[south, w], [north, e]];

    if (overlay) map.removeLayer(overlay);
    overlay = L.imageOverlay(URL.createObjectURL(blob), bounds, { opacity: 0.75 }).addTo(map);
    map.fitBounds(bounds);
    el('legend').src = '/legend?' + qs + '&seq=' + seq;
    setStatus('', false);
  } catch (err) {
    if (seq === requestSeq) setStatus('Request failed: ' + err, true);
  }
}

async function init() {
  // Default to today's date in UTC
  el('date').value = new Date().toISOString().slice(0, 10);

  const resp = await fetch('/api/parameters');
  const catalog = await resp.json();
  for (const p of catalog.parameters) {
    const opt = document.createElement('option');
    opt.value = p.key;
    opt.textContent = `${p.label} (${p.units})`;
    el('param').appendChild(opt);
  }

  for (const id of controls) el(id).addEventListener('change', refresh);
  refresh();
}

init();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_all_endpoints() {
        assert!(INDEX_HTML.contains("/map?"));
        assert!(INDEX_HTML.contains("/legend?"));
        assert!(INDEX_HTML.contains("/api/parameters"));
    }

    #[test]
    fn test_page_has_all_controls() {
        for id in [
            "date", "hour", "param", "step", "lat_min", "lat_max", "lon_min", "lon_max",
        ] {
            assert!(INDEX_HTML.contains(&format!("id=\"{}\"", id)), "missing {}", id);
        }
    }
}
