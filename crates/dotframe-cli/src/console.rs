use dotframe::Surface;

/// Render a surface as terminal text, one character per pixel, using a
/// dark-to-bright ramp scaled to the format's color range.
pub fn preview(surface: &Surface<'_>) -> String {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let mask = surface.format().mask() as u64;
    let mut out = String::with_capacity((surface.width() as usize + 1) * surface.height() as usize);
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let v = surface.get_pixel(x, y) as u64;
            let idx = if mask <= 1 {
                if v != 0 {
                    RAMP.len() - 1
                } else {
                    0
                }
            } else {
                (v * (RAMP.len() as u64 - 1) / mask) as usize
            };
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    out
}
