// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, RGBA8, round_channel};

/// Draws `src_region` of the `src` image over `dest` using the "source over" operator.
///
/// The region's top-left corner is placed at (`dx`, `dy`) in `dest`.
/// Parts that fall outside `dest` are skipped. So are fully transparent source pixels.
pub fn alpha_blit(
    src: ImageRef,
    src_region: Region,
    mut dest: ImageRefMut,
    dx: i32,
    dy: i32,
) {
    let region = src_region.fit_to(src.width, src.height);
    let dest_region = Region::from_size(dest.width, dest.height);

    for y in region.rows() {
        for x in region.columns() {
            let p = src.pixel_at(x, y);
            if p.a == 0 {
                continue;
            }

            let tx = x as i32 - region.x1() + dx;
            let ty = y as i32 - region.y1() + dy;
            if !dest_region.contains(tx, ty) {
                continue;
            }

            let d = dest.pixel_at_mut(tx as u32, ty as u32);
            *d = source_over(p, *d);
        }
    }
}

fn source_over(s: RGBA8, d: RGBA8) -> RGBA8 {
    if s.a == 255 || d.a == 0 {
        return s;
    }

    let sa = s.a as f64 / 255.0;
    let da = d.a as f64 / 255.0 * (1.0 - sa);
    let ra = sa + da;

    let calc = |cs: u8, cd: u8| round_channel((cs as f64 * sa + cd as f64 * da) / ra);

    RGBA8 {
        r: calc(s.r, d.r),
        g: calc(s.g, d.g),
        b: calc(s.b, d.b),
        a: round_channel(ra * 255.0),
    }
}
