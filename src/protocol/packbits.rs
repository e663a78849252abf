//! TIFF PackBits run-length encoding, used for compressed raster lines.
//!
//! ```text
//! header 0..=127     copy the next header+1 bytes literally
//! header 129..=255   repeat the next byte 257-header times
//! ```

/// Longest literal or run a single header can describe.
const MAX_RUN: usize = 128;

pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / MAX_RUN + 1);
    let mut i = 0;

    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && run < MAX_RUN && data[i + run] == data[i] {
            run += 1;
        }

        if run > 1 {
            out.push((257 - run) as u8);
            out.push(data[i]);
            i += run;
            continue;
        }

        // Literal: stop where a repeat begins.
        let start = i;
        i += 1;
        while i < data.len() && i - start < MAX_RUN {
            if i + 1 < data.len() && data[i] == data[i + 1] {
                break;
            }
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&data[start..i]);
    }

    out
}
