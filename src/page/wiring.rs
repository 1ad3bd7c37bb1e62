//! Client-side behaviour appended to the page body: smooth scrolling for
//! navigation links, the back-to-top control and the interactive controls.

use crate::render::markup::{Element, Node};
use crate::render::publications::ALL_FILTER;
use crate::theme::THEME_KEY;

/// Scroll offset in pixels past which the back-to-top control is shown.
pub const BACK_TO_TOP_THRESHOLD: u32 = 300;

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > f64::from(BACK_TO_TOP_THRESHOLD)
}

const NAVIGATION: &str = r#"
  document.querySelectorAll('nav a').forEach(function (anchor) {
    anchor.addEventListener('click', function (e) {
      var target = document.querySelector(this.getAttribute('href'));
      if (!target) return;
      e.preventDefault();
      target.scrollIntoView({ behavior: 'smooth' });
    });
  });
  var backToTop = document.getElementById('back-to-top');
  if (backToTop) {
    window.addEventListener('scroll', function () {
      backToTop.classList.toggle('visible', window.scrollY > __THRESHOLD__);
    });
    backToTop.addEventListener('click', function () {
      window.scrollTo({ top: 0, behavior: 'smooth' });
    });
  }
"#;

/// Served pages ask the server to filter publications and to toggle the theme.
const LIVE_CONTROLS: &str = r#"
  function showTheme(t) {
    document.documentElement.setAttribute('data-theme', t.theme);
    var button = document.getElementById('theme-toggle');
    if (button) { button.textContent = t.icon; button.setAttribute('aria-label', t.label); }
  }
  var filters = document.getElementById('publications-filters');
  if (filters) {
    filters.addEventListener('click', function (e) {
      var button = e.target.closest('.filter-btn');
      if (!button) return;
      fetch('/fragments/publications?year=' + encodeURIComponent(button.dataset.filter) +
        '&type=' + encodeURIComponent(button.dataset.yearType || ''))
        .then(function (r) { return r.json(); })
        .then(function (f) {
          filters.innerHTML = f.filters;
          document.getElementById('publications-list').innerHTML = f.list;
        });
    });
  }
  var toggle = document.getElementById('theme-toggle');
  if (toggle) {
    toggle.addEventListener('click', function () {
      fetch('/theme/toggle', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ current: document.documentElement.getAttribute('data-theme') })
      }).then(function (r) { return r.json(); }).then(showTheme);
    });
  }
"#;

/// Static pages keep the preference in the browser under the same key.
const STATIC_CONTROLS: &str = r#"
  var icons = { dark: ['☀️', 'Switch to light mode'], light: ['🌙', 'Switch to dark mode'] };
  function showTheme(theme) {
    document.documentElement.setAttribute('data-theme', theme);
    var button = document.getElementById('theme-toggle');
    if (button) { button.textContent = icons[theme][0]; button.setAttribute('aria-label', icons[theme][1]); }
  }
  var saved = localStorage.getItem('__THEME_KEY__');
  if (saved === 'dark' || saved === 'light') showTheme(saved);
  else if (window.matchMedia)
    showTheme(window.matchMedia('(prefers-color-scheme: light)').matches ? 'light' : 'dark');
  var toggle = document.getElementById('theme-toggle');
  if (toggle) {
    toggle.addEventListener('click', function () {
      var current = document.documentElement.getAttribute('data-theme') || 'dark';
      var next = current === 'dark' ? 'light' : 'dark';
      localStorage.setItem('__THEME_KEY__', next);
      showTheme(next);
    });
  }
  function yearMatches(item, year, type) {
    var own = item.dataset.year;
    if (own === undefined) return false;
    return item.dataset.yearType === type ? own === year : Number(own) === Number(year);
  }
  var filters = document.getElementById('publications-filters');
  if (filters) {
    filters.addEventListener('click', function (e) {
      var button = e.target.closest('.filter-btn');
      if (!button) return;
      filters.querySelectorAll('.filter-btn').forEach(function (b) { b.classList.remove('active'); });
      button.classList.add('active');
      var year = button.dataset.filter, type = button.dataset.yearType;
      document.querySelectorAll('#publications-list .pub-item').forEach(function (item) {
        var shown = year === '__ALL_FILTER__' || yearMatches(item, year, type);
        item.style.display = shown ? '' : 'none';
      });
    });
  }
"#;

/// The behaviour script. `live` selects server-backed controls.
pub fn script(live: bool) -> Node {
    let controls = if live { LIVE_CONTROLS } else { STATIC_CONTROLS };
    let body = format!("\n(function () {{{}{}}})();\n", NAVIGATION, controls)
        .replace("__THRESHOLD__", &BACK_TO_TOP_THRESHOLD.to_string())
        .replace("__THEME_KEY__", THEME_KEY)
        .replace("__ALL_FILTER__", ALL_FILTER);

    Element::new("script").raw(body).into()
}
