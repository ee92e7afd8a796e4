//! Stylesheet and script embedded in every report.

pub const STYLES: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  padding: 20px;
  min-height: 100vh;
  color: #1f2328;
}
.container { max-width: 1400px; margin: 0 auto; }
.panel {
  background: white;
  border-radius: 12px;
  padding: 25px;
  margin-bottom: 25px;
  box-shadow: 0 10px 30px rgba(0,0,0,0.2);
}
.header h1 { font-size: 30px; margin-bottom: 8px; }
.header .subtitle, .header .last-updated { color: #656d76; font-size: 14px; }
.header a { color: #0969da; text-decoration: none; }
.stats {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 20px;
  margin-bottom: 25px;
}
.stat-card { text-align: center; margin-bottom: 0; }
.stat-card h3 {
  color: #656d76;
  font-size: 14px;
  text-transform: uppercase;
  letter-spacing: 1px;
  margin-bottom: 10px;
}
.stat-card .number { font-size: 46px; font-weight: bold; color: #667eea; }
.charts {
  display: grid;
  grid-template-columns: minmax(240px, 1fr) 3fr;
  gap: 20px;
  margin-bottom: 25px;
}
.charts .panel { margin-bottom: 0; }
.charts h2 { font-size: 20px; margin-bottom: 15px; }
.chart { width: 100%; height: auto; }
.distribution-chart { max-width: 240px; display: block; margin: 0 auto; }
.chart-center { font-size: 34px; font-weight: bold; fill: #1f2328; }
.chart .grid { stroke: #eaeef2; stroke-width: 1; }
.chart .axis { font-size: 11px; fill: #656d76; }
.legend { margin-top: 10px; font-size: 13px; color: #656d76; text-align: center; }
.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin: 0 4px 0 10px; }
.controls { display: flex; gap: 15px; flex-wrap: wrap; align-items: center; }
.search-bar {
  flex: 1;
  min-width: 240px;
  padding: 10px 16px;
  border: 2px solid #d0d7de;
  border-radius: 8px;
  font-size: 15px;
}
.search-bar:focus { outline: none; border-color: #667eea; }
.tab-btn {
  padding: 8px 16px;
  border: 2px solid #667eea;
  background: white;
  color: #667eea;
  border-radius: 6px;
  cursor: pointer;
  font-size: 14px;
  font-weight: 600;
}
.tab-btn:hover, .tab-btn.active { background: #667eea; color: white; }
.table-panel { display: none; overflow-x: auto; }
.table-panel.active { display: block; }
table { width: 100%; border-collapse: collapse; }
th {
  background: #f6f8fa;
  padding: 10px;
  text-align: left;
  font-weight: 600;
  border-bottom: 2px solid #d0d7de;
  position: sticky;
  top: 0;
  white-space: nowrap;
}
th.sortable { cursor: pointer; user-select: none; }
th.sortable:hover { background: #eaeef2; }
th.sortable::after { content: ' \2195'; color: #afb8c1; }
th.sortable.asc::after { content: ' \25B2'; color: #1f2328; }
th.sortable.desc::after { content: ' \25BC'; color: #1f2328; }
td { padding: 10px; border-bottom: 1px solid #eaeef2; vertical-align: top; }
tr:hover td { background: #f6f8fa; }
td a { color: #0969da; text-decoration: none; }
td a:hover { text-decoration: underline; }
.issue-title { max-width: 420px; font-weight: 500; }
.repo-badge {
  display: inline-block;
  background: #ddf4ff;
  padding: 3px 10px;
  border-radius: 12px;
  font-size: 12px;
}
.status-badge {
  display: inline-block;
  padding: 3px 10px;
  border-radius: 12px;
  font-size: 12px;
  font-weight: 600;
  text-transform: uppercase;
}
.status-badge.status-open { background: #dafbe1; color: #1a7f37; }
.status-badge.status-closed { background: #fbefff; color: #8250df; }
.label {
  display: inline-block;
  padding: 2px 8px;
  border-radius: 10px;
  font-size: 11px;
  font-weight: 500;
  margin: 0 4px 3px 0;
}
.unassigned, .placeholder { color: #8c959f; font-style: italic; }
.empty { color: #656d76; padding: 20px; text-align: center; }
.footer { text-align: center; color: white; margin-top: 10px; font-size: 13px; }
@media (max-width: 800px) { .charts { grid-template-columns: 1fr; } }
"#;

/// The script holds no sorting rules of its own. Each table carries its
/// current state in `data-sort-state` and the full transition table in
/// `data-transitions`; each row carries an integer rank per column.
pub const SCRIPT: &str = r#"
(function() {
  'use strict';

  const transitions = {};
  document.querySelectorAll('table.issues').forEach(function(table) {
    transitions[table.dataset.table] = JSON.parse(table.dataset.transitions);
  });

  // 'default' sorts by data-rank; 'title:desc' by data-rank-title, reversed.
  function sortTable(table, state) {
    const parts = state.split(':');
    const attribute = parts.length === 2 ? 'data-rank-' + parts[0] : 'data-rank';
    const sign = parts[1] === 'desc' ? -1 : 1;
    const tbody = table.tBodies[0];
    const rows = Array.from(tbody.rows);
    // Array.prototype.sort is stable, so equal ranks keep their current order.
    rows.sort(function(a, b) {
      return sign * (Number(a.getAttribute(attribute)) - Number(b.getAttribute(attribute)));
    });
    rows.forEach(function(row) { tbody.appendChild(row); });

    table.querySelectorAll('th.sortable').forEach(function(th) {
      th.classList.remove('asc', 'desc');
      if (parts.length === 2 && th.dataset.column === parts[0]) {
        th.classList.add(parts[1]);
      }
    });
  }

  function handleHeaderClick(tableId, column) {
    const table = document.getElementById('table-' + tableId);
    const next = table && transitions[tableId][table.dataset.sortState][column];
    if (!next) {
      return;
    }
    table.dataset.sortState = next;
    sortTable(table, next);
  }

  function showTable(tableId) {
    document.querySelectorAll('.tab-btn').forEach(function(btn) {
      btn.classList.toggle('active', btn.dataset.table === tableId);
    });
    document.querySelectorAll('.table-panel').forEach(function(panel) {
      panel.classList.toggle('active', panel.id === 'panel-' + tableId);
    });
  }

  function filterRows(term) {
    const needle = term.trim().toLowerCase();
    document.querySelectorAll('table.issues tbody tr').forEach(function(row) {
      const match = !needle || row.textContent.toLowerCase().indexOf(needle) !== -1;
      row.style.display = match ? '' : 'none';
    });
  }

  document.querySelectorAll('th.sortable').forEach(function(th) {
    th.addEventListener('click', function() {
      handleHeaderClick(th.closest('table').dataset.table, th.dataset.column);
    });
  });
  document.querySelectorAll('.tab-btn').forEach(function(btn) {
    btn.addEventListener('click', function() { showTable(btn.dataset.table); });
  });
  const search = document.getElementById('search-input');
  if (search) {
    search.addEventListener('input', function() { filterRows(search.value); });
  }
})();
"#;
