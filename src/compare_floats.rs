pub fn min_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first < second {
        first
    } else {
        second
    }
}

pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

/// Restrict a value to the inclusive range [lower, upper]. Assumes lower <= upper.
pub(crate) fn clamp_between<T: PartialOrd + Copy>(value: T, lower: T, upper: T) -> T {
    min_of_2(max_of_2(value, lower), upper)
}
