//! Top-down overview drawn into its own small buffer.

use glam::{IVec2, Vec2};

use crate::{
    renderer::{
        Rgba,
        color::{lerp, rgb},
    },
    world::{CameraPose, MAX_MATERIAL, RenderableEntity, TileMap},
};

const OPEN: Rgba = rgb(22, 22, 28);
const HAZARD: Rgba = rgb(40, 150, 40);
const DOOR: Rgba = rgb(150, 110, 40);
const PLAYER: Rgba = rgb(255, 230, 40);
const FACING: Rgba = rgb(255, 255, 160);
const ENEMY: Rgba = rgb(230, 30, 30);

const WALLS: [Rgba; MAX_MATERIAL as usize] = [
    rgb(150, 70, 55),
    rgb(120, 125, 135),
    rgb(40, 110, 90),
    rgb(140, 80, 40),
    rgb(115, 80, 45),
    rgb(170, 165, 150),
    rgb(60, 100, 50),
    rgb(100, 100, 110),
];

/// Facing line length in cells.
const FACING_LEN: f32 = 1.5;

pub struct Minimap {
    cell: usize,
    width: usize,
    height: usize,
    buffer: Vec<Rgba>,
}

impl Minimap {
    /// `cell` is the edge length in pixels of one map tile.
    pub fn new(cell: usize) -> Self {
        Self {
            cell: cell.max(1),
            width: 0,
            height: 0,
            buffer: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn buffer(&self) -> &[Rgba] {
        &self.buffer
    }

    /// Redraw tiles, live enemies and the player blip.
    pub fn render(&mut self, map: &TileMap, camera: &CameraPose, entities: &[RenderableEntity]) {
        self.width = map.width() * self.cell;
        self.height = map.height() * self.cell;
        self.buffer.resize(self.width * self.height, OPEN);

        for ty in 0..map.height() as i32 {
            for tx in 0..map.width() as i32 {
                let color = tile_color(map, tx, ty);
                self.fill_cell(tx as usize, ty as usize, color);
            }
        }

        for e in entities.iter().filter(|e| e.is_live_enemy()) {
            self.blip(self.to_px(e.pos()), 2, ENEMY);
        }

        let p = self.to_px(camera.pos);
        let tip = self.to_px(camera.pos + camera.forward() * FACING_LEN);
        self.draw_line(p.x, p.y, tip.x, tip.y, FACING);
        self.blip(p, 3, PLAYER);
    }

    #[inline]
    fn to_px(&self, p: Vec2) -> IVec2 {
        (p * self.cell as f32).floor().as_ivec2()
    }

    fn fill_cell(&mut self, tx: usize, ty: usize, color: Rgba) {
        let (x0, y0) = (tx * self.cell, ty * self.cell);
        for y in y0..y0 + self.cell {
            let row = y * self.width;
            self.buffer[row + x0..row + x0 + self.cell].fill(color);
        }
    }

    /// `size`×`size` square centred on `c`, clipped to the buffer.
    fn blip(&mut self, c: IVec2, size: i32, color: Rgba) {
        let x0 = c.x - size / 2;
        let y0 = c.y - size / 2;
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                self.put(x, y, color);
            }
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.buffer[y as usize * self.width + x as usize] = color;
        }
    }

    /// Bresenham line, clipped per pixel.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba) {
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

fn tile_color(map: &TileMap, x: i32, y: i32) -> Rgba {
    match map.material(x, y) {
        Some(0) | None => {
            if map.is_hazard(x, y) {
                HAZARD
            } else {
                OPEN
            }
        }
        Some(m) => match map.door_at(x, y) {
            Some(d) => lerp(DOOR, OPEN, d.open_amount),
            None => WALLS[(m.clamp(1, MAX_MATERIAL) - 1) as usize],
        },
    }
}
