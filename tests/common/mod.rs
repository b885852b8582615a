#![allow(dead_code)]

use image::{DynamicImage, ImageOutputFormat, RgbImage};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::io::Cursor;

/// Build an in-memory `.xlsx` whose first sheet holds `header` and `rows`.
pub fn xlsx_bytes(header: &[&str], rows: &[Vec<&str>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    for (c, name) in header.iter().enumerate() {
        worksheet.write_string(0, c as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet
                .write_string((r + 1) as u32, c as u16, *value)
                .unwrap();
        }
    }

    workbook.push_worksheet(worksheet);
    workbook.save_to_buffer().unwrap()
}

/// A workbook with only a `link` column.
pub fn link_workbook(links: &[String]) -> Vec<u8> {
    let rows: Vec<Vec<&str>> = links.iter().map(|l| vec![l.as_str()]).collect();
    xlsx_bytes(&["link"], &rows)
}

/// PNG-encoded solid image of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let image = DynamicImage::ImageRgb8(pixels);
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Png)
        .unwrap();
    buffer
}
