use staff_clusters::filaments::{FilamentId, FilamentStore, Section};

/// Filaments of a synthetic five-line staff.
///
/// Every line is split into a left and a right filament overlapping around
/// the middle of the staff. One comb crosses the left halves, one the right
/// halves, and a middle comb links the two halves together.
pub struct SyntheticStaff {
    pub left: Vec<FilamentId>,
    pub right: Vec<FilamentId>,
    pub width: i32,
    pub top: i32,
}

impl SyntheticStaff {
    pub fn line_y(&self, index: usize, interline: i32) -> f32 {
        (self.top + interline * index as i32) as f32
    }
}

pub fn add_staff(store: &mut FilamentStore, top: i32, interline: i32, width: i32) -> SyntheticStaff {
    assert!(width >= 40, "staff too narrow");
    let half = width / 2;
    let mut left = Vec::with_capacity(5);
    let mut right = Vec::with_capacity(5);
    for k in 0..5 {
        let y = top + interline * k;
        left.push(store.add_filament(Vec::new(), vec![Section::horizontal(y, 0, half + 10)]));
    }
    for k in 0..5 {
        let y = top + interline * k;
        right.push(store.add_filament(
            Vec::new(),
            vec![Section::horizontal(y, half - 10, width - half + 10)],
        ));
    }

    store.add_comb(width / 5, left.clone());
    store.add_comb(width * 4 / 5, right.clone());
    let mut middle = vec![left[0], left[1]];
    middle.extend_from_slice(&right[2..]);
    store.add_comb(half, middle);

    SyntheticStaff {
        left,
        right,
        width,
        top,
    }
}

/// Short filament one interline above the staff, combed with its two top
/// lines like a ledger would be.
pub fn add_ledger_above(store: &mut FilamentStore, staff: &SyntheticStaff, interline: i32) -> FilamentId {
    let x = staff.width / 2 - 20;
    let ledger = store.add_filament(
        Vec::new(),
        vec![Section::horizontal(staff.top - interline, x - 10, 30)],
    );
    store.add_comb(x, vec![ledger, staff.left[0], staff.left[1]]);
    ledger
}
