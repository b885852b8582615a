/*!
# Sheet Gallery

A browser-based viewer that turns a spreadsheet of image links into a
thumbnail grid, built in Rust.

## Overview

Upload an `.xlsx` workbook whose first sheet has a `link` column holding one
image URL per row. The server fetches each image, shrinks it to a 150×150
thumbnail and lays the thumbnails out in a 10-column grid, each captioned
`Image N` with its 1-based row number.

## Architecture

Every interaction re-runs one linear pass:

1. **Input** - the uploaded workbook is parsed into a [`table::Table`] and
   checked for a `link` column.
2. **Selection** - a [`layout::Policy`] picks the rows to show:
   - *Sequential*: the first 1000 rows, 100 per column.
   - *Row selection*: user-entered row numbers, each expanded across the ten
     columns with a banded index (`r + c * (len / 10)`).
3. **Render** - [`render::render_pass`] fetches each planned image in order
   through the per-session [`cache::ImageCache`] and collects the grid.

A failed image never stops the pass; its error is shown inline and the rest
of the grid still renders.

## Modules

- **table**: workbook loading and `link` column validation
- **selection**: parsing of comma-separated row numbers
- **layout**: the two index-mapping policies
- **thumbnail**: bounded resize and PNG encoding
- **fetch**: HTTP download and decode of one image
- **cache**: URL memoization of fetch outcomes
- **render**: the render pass and grid model
- **session**: per-browser state behind a cookie
- **config**: server settings
- **app**: routing and handlers

## HTTP Endpoints

- `GET /` - the gallery page; `?rows=2,5` switches to row selection
- `POST /upload` - multipart upload, field `file`
- `GET /thumbnail/{index}` - PNG thumbnail for a rendered row
*/

pub mod cache;
pub mod error;
pub mod layout;
pub mod render;
pub mod selection;
pub mod table;
pub mod thumbnail;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod fetch;
#[cfg(feature = "web")]
pub mod session;

pub use error::{GalleryError, Result};
