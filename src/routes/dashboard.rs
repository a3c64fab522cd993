use axum::{
    http::header,
    response::{Html, IntoResponse},
};
use std::sync::LazyLock;

use crate::error::LOAD_FAILURE_MESSAGE;

/// Page with the failure text filled in, built once.
static DASHBOARD_PAGE: LazyLock<String> =
    LazyLock::new(|| DASHBOARD_HTML.replace("{{LOAD_FAILURE_MESSAGE}}", LOAD_FAILURE_MESSAGE));

pub async fn dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_PAGE.as_str()),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>温度グラフ</title>
    <style>
        :root {
            --bg: #f8fafc;
            --surface: #ffffff;
            --border: #e2e8f0;
            --text: #1e293b;
            --muted: #64748b;
            --accent: #4ecdc4;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }

        .container {
            max-width: 1000px;
            margin: 0 auto;
            padding: 1.5rem;
        }

        header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 1rem;
            gap: 1rem;
        }
        h1 { font-size: 1.25rem; font-weight: 600; }

        .reload-btn {
            padding: 0.5rem 1rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            font-size: 0.875rem;
            background: var(--surface);
            cursor: pointer;
        }
        .reload-btn:hover { border-color: var(--accent); }

        .status {
            font-size: 0.875rem;
            color: var(--muted);
            margin-bottom: 0.25rem;
        }

        .chart-box {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
            height: 400px;
            margin: 1rem 0;
        }

        table {
            width: 100%;
            border-collapse: collapse;
            background: var(--surface);
            border: 1px solid var(--border);
            font-size: 0.875rem;
        }
        th, td {
            padding: 0.4rem 0.75rem;
            border-bottom: 1px solid var(--border);
            text-align: left;
            font-variant-numeric: tabular-nums;
        }
        tr.hour-mark { background: #e6f7f6; font-weight: 600; }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>温度グラフ</h1>
            <button class="reload-btn" id="reload-btn">再読み込み</button>
        </header>
        <div class="status" id="mytemp-info" data-failure="{{LOAD_FAILURE_MESSAGE}}">読み込み中...</div>
        <div class="status" id="mytemp-battery"></div>
        <div class="chart-box">
            <canvas id="mytemp-chart"></canvas>
        </div>
        <table>
            <thead><tr><th>日時</th><th>温度</th></tr></thead>
            <tbody id="mytemp-table-body"></tbody>
        </table>
    </div>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<script>
let chart = null;

function createChart(config) {
    const noData = config.options.plugins.tooltip.noDataText;
    config.options.plugins.tooltip.callbacks = {
        label: ctx => ctx.parsed.y === null
            ? `${ctx.dataset.label}: ${noData}`
            : `${ctx.dataset.label}: ${ctx.parsed.y}°C`
    };
    if (chart) chart.destroy();
    chart = new Chart(document.getElementById('mytemp-chart').getContext('2d'), config);
}

function renderTable(rows) {
    const body = document.getElementById('mytemp-table-body');
    body.innerHTML = '';
    rows.forEach(row => {
        const tr = document.createElement('tr');
        if (row.hour_mark) tr.classList.add('hour-mark');
        const time = document.createElement('td');
        time.textContent = row.time_label;
        const temp = document.createElement('td');
        temp.textContent = row.temp_label;
        tr.append(time, temp);
        body.appendChild(tr);
    });
}

async function load() {
    const info = document.getElementById('mytemp-info');
    const battery = document.getElementById('mytemp-battery');
    try {
        const res = await fetch('/api/dashboard');
        const data = await res.json();
        if (!res.ok) {
            console.error('Failed to load dashboard:', data.reason);
            info.textContent = data.error;
            battery.textContent = '';
            return;
        }
        createChart(data.chart);
        info.textContent = data.summary;
        battery.textContent = data.battery;
        renderTable(data.rows);
    } catch (error) {
        console.error('Failed to load dashboard:', error);
        info.textContent = info.dataset.failure;
        battery.textContent = '';
    }
}

document.getElementById('reload-btn').addEventListener('click', load);
load();
</script>
</body>
</html>
"##;
