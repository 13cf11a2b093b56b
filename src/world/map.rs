use glam::{IVec2, Vec2};
use thiserror::Error;

/// Wall material of one tile. `0` = open floor, `1..=8` select a wall texture.
pub type MaterialId = u8;

/// Index into [`TileMap::doors`].
pub type DoorId = u16;

/// Sentinel stored in the per-cell door lookup when a cell has no door.
pub const NO_DOOR: DoorId = u16::MAX;

/// Open amount above which a door no longer blocks movement.
pub const DOOR_PASSABLE: f32 = 0.8;
/// Open amount at which a door stops blocking view rays.
pub const DOOR_RAY_TRANSPARENT: f32 = 0.9;
/// Open-amount change per second while a door is moving.
pub const DOOR_SPEED: f32 = 1.25;

/// Number of distinct wall materials (`1..=MAX_MATERIAL`).
pub const MAX_MATERIAL: MaterialId = 8;

/// A sliding door occupying one wall cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub cell: IVec2,
    /// Key required to open, `0` = none. Checked by game code, not here.
    pub key: u8,
    /// 0 = shut, 1 = fully open.
    pub open_amount: f32,
    pub opening: bool,
    pub closing: bool,
}

impl Door {
    pub fn new(x: i32, y: i32, key: u8) -> Self {
        Self {
            cell: IVec2::new(x, y),
            key,
            open_amount: 0.0,
            opening: false,
            closing: false,
        }
    }

    /// Collision test used by movement code.
    #[inline]
    pub fn blocks_movement(&self) -> bool {
        self.open_amount <= DOOR_PASSABLE
    }

    /// Visibility test used by the wall caster.
    #[inline]
    pub fn blocks_rays(&self) -> bool {
        self.open_amount < DOOR_RAY_TRANSPARENT
    }

    fn advance(&mut self, dt: f32) {
        if self.opening {
            self.open_amount = (self.open_amount + DOOR_SPEED * dt).min(1.0);
            if self.open_amount >= 1.0 {
                self.opening = false;
            }
        } else if self.closing {
            self.open_amount = (self.open_amount - DOOR_SPEED * dt).max(0.0);
            if self.open_amount <= 0.0 {
                self.closing = false;
            }
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("map layout is empty")]
    Empty,

    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown tile glyph `{glyph}` at ({x}, {y})")]
    BadGlyph { glyph: char, x: usize, y: usize },

    #[error("door at ({0}, {1}) lies outside the grid")]
    DoorOutOfBounds(i32, i32),

    #[error("door at ({0}, {1}) sits on an open tile")]
    DoorOnOpenTile(i32, i32),

    #[error("cell ({0}, {1}) already has a door")]
    DuplicateDoor(i32, i32),
}

/// Tile grid plus the per-tile floor heights, hazard flags and door list.
///
/// Row-major, `(0,0)` is the top-left corner and `y` grows downwards.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: usize,
    height: usize,
    walls: Vec<MaterialId>,
    floor_heights: Vec<f32>,
    hazards: Vec<bool>,
    door_slots: Vec<DoorId>,
    doors: Vec<Door>,
}

impl TileMap {
    /// Empty (all open) map of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let n = width * height;
        Self {
            width,
            height,
            walls: vec![0; n],
            floor_heights: vec![0.0; n],
            hazards: vec![false; n],
            door_slots: vec![NO_DOOR; n],
            doors: Vec::new(),
        }
    }

    /// Build a map from text rows.
    ///
    /// * `.` or `0` – open floor
    /// * `1`‥`8`    – wall material
    /// * `~`        – open floor flagged as hazard
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut map = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let idx = y * width + x;
                match glyph {
                    '.' | '0' => {}
                    '~' => map.hazards[idx] = true,
                    '1'..='8' => map.walls[idx] = glyph as u8 - b'0',
                    _ => return Err(MapError::BadGlyph { glyph, x, y }),
                }
            }
        }
        Ok(map)
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
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    /*──────────────────────── tile accessors ────────────────────────*/

    /// Material of a cell, `None` outside the grid.
    #[inline]
    pub fn material(&self, x: i32, y: i32) -> Option<MaterialId> {
        self.index(x, y).map(|i| self.walls[i])
    }

    #[inline]
    pub fn floor_height(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |i| self.floor_heights[i])
    }

    #[inline]
    pub fn is_hazard(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.hazards[i])
    }

    /// Panics outside the grid or for a material above [`MAX_MATERIAL`].
    pub fn set_wall(&mut self, x: usize, y: usize, material: MaterialId) {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside map");
        assert!(material <= MAX_MATERIAL, "material {material} out of range");
        self.walls[y * self.width + x] = material;
    }

    pub fn set_floor_height(&mut self, x: usize, y: usize, h: f32) {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside map");
        self.floor_heights[y * self.width + x] = h;
    }

    pub fn set_hazard(&mut self, x: usize, y: usize, hazard: bool) {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside map");
        self.hazards[y * self.width + x] = hazard;
    }

    /*──────────────────────── doors ─────────────────────────────────*/

    /// Register a door. The cell must already hold a wall material.
    pub fn add_door(&mut self, door: Door) -> Result<DoorId, MapError> {
        let (x, y) = (door.cell.x, door.cell.y);
        let idx = self.index(x, y).ok_or(MapError::DoorOutOfBounds(x, y))?;
        if self.walls[idx] == 0 {
            return Err(MapError::DoorOnOpenTile(x, y));
        }
        if self.door_slots[idx] != NO_DOOR {
            return Err(MapError::DuplicateDoor(x, y));
        }
        let id = self.doors.len() as DoorId;
        self.doors.push(door);
        self.door_slots[idx] = id;
        Ok(id)
    }

    #[inline]
    pub fn door_at(&self, x: i32, y: i32) -> Option<&Door> {
        let slot = self.door_slots[self.index(x, y)?];
        if slot == NO_DOOR {
            None
        } else {
            self.doors.get(slot as usize)
        }
    }

    #[inline]
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.get_mut(id as usize)
    }

    pub fn open_door(&mut self, id: DoorId) {
        if let Some(d) = self.door_mut(id) {
            d.opening = true;
            d.closing = false;
        }
    }

    pub fn close_door(&mut self, id: DoorId) {
        if let Some(d) = self.door_mut(id) {
            d.closing = true;
            d.opening = false;
        }
    }

    /// Advance every moving door by `dt` seconds.
    pub fn update_doors(&mut self, dt: f32) {
        for d in &mut self.doors {
            d.advance(dt);
        }
    }

    /*──────────────────────── world queries ─────────────────────────*/

    /// Is the world point `p` inside something solid?
    ///
    /// Outside the grid counts as solid. A wall cell carrying a door is
    /// solid until the door is open past [`DOOR_PASSABLE`].
    pub fn is_solid(&self, p: Vec2) -> bool {
        let (x, y) = (p.x.floor() as i32, p.y.floor() as i32);
        match self.material(x, y) {
            None => true,
            Some(0) => false,
            Some(_) => self.door_at(x, y).is_none_or(Door::blocks_movement),
        }
    }

    /// Cell test used by the DDA: wall material if the cell stops a view ray.
    #[inline]
    pub fn ray_blocker(&self, x: i32, y: i32) -> Option<MaterialId> {
        match self.material(x, y) {
            // Leaving the grid ends the ray on an implicit boundary wall.
            None => Some(1),
            Some(0) => None,
            Some(m) => match self.door_at(x, y) {
                Some(d) if !d.blocks_rays() => None,
                _ => Some(m),
            },
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
