//! Chunk geometry: the 16×16 column granularity used by the climate caches.

/// Edge length of a chunk in world units.
pub const CHUNK_SIZE: i32 = 16;

/// Integer chunk coordinate on the (x, z) plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkPos {
    /// Chunk index along x.
    pub x: i32,
    /// Chunk index along z.
    pub z: i32,
}

impl ChunkPos {
    /// Construct a chunk position from chunk indices.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk containing world coordinate `(x, z)`.
    ///
    /// Uses floor division so negative coordinates map to negative chunks
    /// (`x = -1` lies in chunk `-1`, not chunk `0`).
    pub fn containing(x: i32, z: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            z: z.div_euclid(CHUNK_SIZE),
        }
    }

    /// World coordinate of the chunk's representative sample point.
    pub fn center(self) -> (i32, i32) {
        (
            self.x * CHUNK_SIZE + CHUNK_SIZE / 2,
            self.z * CHUNK_SIZE + CHUNK_SIZE / 2,
        )
    }

    /// Region index of this chunk for regions `region_size` chunks wide.
    pub fn region(self, region_size: i32) -> (i32, i32) {
        (self.x.div_euclid(region_size), self.z.div_euclid(region_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_positive_and_negative() {
        assert_eq!(ChunkPos::containing(0, 0), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(15, 15), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(16, 31), ChunkPos::new(1, 1));
        assert_eq!(ChunkPos::containing(-1, -16), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::containing(-17, 0), ChunkPos::new(-2, 0));
    }

    #[test]
    fn test_center_lies_inside_chunk() {
        for &(x, z) in &[(0, 0), (-3, 7), (100, -250)] {
            let chunk = ChunkPos::new(x, z);
            let (cx, cz) = chunk.center();
            assert_eq!(ChunkPos::containing(cx, cz), chunk);
        }
        assert_eq!(ChunkPos::new(0, 0).center(), (8, 8));
        assert_eq!(ChunkPos::new(-1, 2).center(), (-8, 40));
    }

    #[test]
    fn test_region_index() {
        assert_eq!(ChunkPos::new(0, 31).region(32), (0, 0));
        assert_eq!(ChunkPos::new(32, -1).region(32), (1, -1));
        assert_eq!(ChunkPos::new(-33, 64).region(32), (-2, 2));
    }
}
