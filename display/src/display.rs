use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;
use sdl2::Sdl;

use vip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8_core::FrameBuffer;

/// A window presenting the interpreter's 64x32 monochrome frame buffer.
///
/// The interpreter never draws here directly: the driver pulls the
/// frame buffer once the redraw flag fires and hands it to `render`.
/// Pixel-to-color mapping and scaling live entirely in this crate.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Open a window scaled up from the native 64x32 resolution.
    pub fn new(sdl: &Sdl, scale: u32) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                "vip8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Display { canvas })
    }

    /// Upload the frame buffer as an RGB24 streaming texture and
    /// present it; the canvas scales it to the window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let creator = self.canvas.texture_creator();
        let mut texture = creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;
        texture
            .with_lock(None, |buffer: &mut [u8], _pitch| {
                buffer.copy_from_slice(&texture_bytes(frame));
            })
            .map_err(|e| e.to_string())?;
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

/// Expand the 1-bit cells to RGB24, white on black.
fn texture_bytes(frame: &FrameBuffer) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
    for row in frame.iter() {
        for &cell in row.iter() {
            bytes.extend_from_slice(&[cell * 0xFF; 3]);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_bytes_expands_cells_to_rgb_triples() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][1] = 1;
        frame[1][0] = 1;

        let bytes = texture_bytes(&frame);
        assert_eq!(bytes.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        assert_eq!(bytes[0..6], [0, 0, 0, 255, 255, 255]);
        assert_eq!(bytes[DISPLAY_WIDTH * 3..DISPLAY_WIDTH * 3 + 6], [255, 255, 255, 0, 0, 0]);
    }
}
