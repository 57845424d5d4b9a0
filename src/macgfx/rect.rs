/// QuickDraw point: vertical coordinate first
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct Point {
    pub v: i16,
    pub h: i16,
}

impl Point {
    pub fn new(v: i16, h: i16) -> Self {
        Self{ v, h }
    }

    pub fn offset(&self, dh: i8, dv: i8) -> Point {
        Point{ v: self.v.wrapping_add(dv as i16), h: self.h.wrapping_add(dh as i16) }
    }
}

/// Half-open box in QuickDraw coordinates (origin top-left)
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct Rect {
    pub top: i16,
    pub left: i16,
    pub bottom: i16,
    pub right: i16,
}

impl Rect {
    pub fn new(top: i16, left: i16, bottom: i16, right: i16) -> Self {
        Self{ top, left, bottom, right }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right as i32 - self.left as i32
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom as i32 - self.top as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn top_left(&self) -> Point {
        Point{ v: self.top, h: self.left }
    }
}
