use crate::error::{Error, Result};
use crate::types::{BoxId, EdgeId, EdgePosition, Orientation};

/// Smallest supported board: 2x2 dots, one box.
pub const MIN_BOARD_SIZE: usize = 2;
/// Largest supported board: 8x8 dots = 112 edges (fits `u128`), 49 boxes (fits `u64`).
pub const MAX_BOARD_SIZE: usize = 8;

/// The four edges bounding a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxEdges {
    pub top: EdgeId,
    pub bottom: EdgeId,
    pub left: EdgeId,
    pub right: EdgeId,
}

impl BoxEdges {
    #[inline]
    #[must_use]
    pub fn as_array(self) -> [EdgeId; 4] {
        [self.top, self.bottom, self.left, self.right]
    }

    #[inline]
    #[must_use]
    pub fn mask(self) -> u128 {
        self.as_array().iter().fold(0u128, |m, &e| m | (1u128 << e))
    }
}

/// Fixed index space of an N x N dot grid. Built once per board size and
/// shared read-only (usually behind an `Arc`) by every state on that board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    size: u8,
    num_horizontal: u8,
    num_vertical: u8,
    boxes: Vec<BoxEdges>,
    // Per-box edge masks, parallel to `boxes`.
    box_masks: Vec<u128>,
    // Boxes bordering each edge: at most two.
    edge_boxes: Vec<[Option<BoxId>; 2]>,
}

impl Topology {
    /// Derive the topology for `size` dots per side.
    ///
    /// # Errors
    /// [`Error::InvalidBoardSize`] unless `size` is within
    /// [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    pub fn build(size: usize) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(Error::InvalidBoardSize {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        let n = size as u8;
        let num_horizontal = n * (n - 1);
        let num_vertical = (n - 1) * n;
        let total = usize::from(num_horizontal) + usize::from(num_vertical);

        let mut boxes = Vec::with_capacity((size - 1) * (size - 1));
        for r in 0..n - 1 {
            for c in 0..n - 1 {
                boxes.push(BoxEdges {
                    top: r * (n - 1) + c,
                    bottom: (r + 1) * (n - 1) + c,
                    left: num_horizontal + r * n + c,
                    right: num_horizontal + r * n + c + 1,
                });
            }
        }

        let mut edge_boxes = vec![[None, None]; total];
        for (bi, b) in boxes.iter().enumerate() {
            for e in b.as_array() {
                let slot = &mut edge_boxes[usize::from(e)];
                if slot[0].is_none() {
                    slot[0] = Some(bi as BoxId);
                } else {
                    slot[1] = Some(bi as BoxId);
                }
            }
        }
        let box_masks = boxes.iter().copied().map(BoxEdges::mask).collect();

        Ok(Self {
            size: n,
            num_horizontal,
            num_vertical,
            boxes,
            box_masks,
            edge_boxes,
        })
    }

    /// Dots per side.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        usize::from(self.size)
    }

    #[inline]
    #[must_use]
    pub fn num_horizontal_edges(&self) -> usize {
        usize::from(self.num_horizontal)
    }

    #[inline]
    #[must_use]
    pub fn num_vertical_edges(&self) -> usize {
        usize::from(self.num_vertical)
    }

    #[inline]
    #[must_use]
    pub fn total_edges(&self) -> usize {
        self.num_horizontal_edges() + self.num_vertical_edges()
    }

    #[inline]
    #[must_use]
    pub fn num_boxes(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    #[must_use]
    pub fn box_edges(&self, b: BoxId) -> BoxEdges {
        self.boxes[usize::from(b)]
    }

    #[inline]
    #[must_use]
    pub fn box_mask(&self, b: BoxId) -> u128 {
        self.box_masks[usize::from(b)]
    }

    /// Boxes bordering `edge`, in ascending box id.
    #[inline]
    pub fn boxes_of_edge(&self, edge: EdgeId) -> impl Iterator<Item = BoxId> + '_ {
        self.edge_boxes[usize::from(edge)].iter().filter_map(|b| *b)
    }

    /// Mask with one bit per edge of this board.
    #[inline]
    #[must_use]
    pub fn all_edges_mask(&self) -> u128 {
        (1u128 << self.total_edges()) - 1
    }

    /// Mask with one bit per box of this board.
    #[inline]
    #[must_use]
    pub fn all_boxes_mask(&self) -> u64 {
        (1u64 << self.num_boxes()) - 1
    }

    #[inline]
    #[must_use]
    pub fn contains_edge(&self, edge: usize) -> bool {
        edge < self.total_edges()
    }

    #[must_use]
    pub fn edge_position(&self, edge: EdgeId) -> EdgePosition {
        debug_assert!(self.contains_edge(usize::from(edge)));
        let n = self.size;
        if edge < self.num_horizontal {
            EdgePosition {
                orientation: Orientation::Horizontal,
                row: edge / (n - 1),
                col: edge % (n - 1),
            }
        } else {
            let v = edge - self.num_horizontal;
            EdgePosition {
                orientation: Orientation::Vertical,
                row: v / n,
                col: v % n,
            }
        }
    }

    /// Inverse of [`Topology::edge_position`]; `None` when off the grid.
    #[must_use]
    pub fn edge_at(&self, orientation: Orientation, row: u8, col: u8) -> Option<EdgeId> {
        let n = self.size;
        match orientation {
            Orientation::Horizontal if row < n && col < n - 1 => Some(row * (n - 1) + col),
            Orientation::Vertical if row < n - 1 && col < n => {
                Some(self.num_horizontal + row * n + col)
            }
            _ => None,
        }
    }
}
