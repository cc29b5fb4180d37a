//! Pledge amount schedule: a sparse table of per-pid pledge prices keyed by a bucketed network
//! capacity (in MiB), reproduced exactly from the source constants.

use poc_types::U256;

/// `(capacity_mib_band, price_per_10_pids_wei)`. The stored value is ten times one pid's price;
/// [`pledge_amount`] divides by ten after lookup, matching the source's `big.Int.Div(_, 10)`.
const PLEDGE_BASE: &[(u64, u128)] = &[
    (100, 56_250 * WEI_1E16),
    (200, 49_219 * WEI_1E16),
    (300, 42_188 * WEI_1E16),
    (400, 31_641 * WEI_1E16),
    (500, 25_313 * WEI_1E16),
    (600, 21_094 * WEI_1E16),
    (700, 18_080 * WEI_1E16),
    (800, 15_820 * WEI_1E16),
    (900, 15_625 * WEI_1E16),
    (1_000, 14_625 * WEI_1E16),
    (1_100, 14_318 * WEI_1E16),
    (1_200, 14_063 * WEI_1E16),
    (1_300, 12_981 * WEI_1E16),
    (1_400, 12_054 * WEI_1E16),
    (1_500, 11_250 * WEI_1E16),
    (1_600, 10_547 * WEI_1E16),
    (1_700, 9_926 * WEI_1E16),
    (1_800, 9_375 * WEI_1E16),
    (1_900, 8_882 * WEI_1E16),
    (2_000, 8_438 * WEI_1E16),
    (3_000, 7_969 * WEI_1E16),
    (4_000, 6_328 * WEI_1E16),
    (5_000, 5_063 * WEI_1E16),
    (6_000, 4_219 * WEI_1E16),
    (7_000, 3_616 * WEI_1E16),
    (8_000, 3_164 * WEI_1E16),
    (9_000, 2_813 * WEI_1E16),
    (10_000, 2_531 * WEI_1E16),
    (20_000, 1_266 * WEI_1E16),
    (30_000, 844 * WEI_1E16),
];

const WEI_1E16: u128 = 10_000_000_000_000_000;

/// Buckets a raw network capacity (MiB) into the band key `PLEDGE_BASE` is indexed by.
///
/// Mirrors the source's capacity-banding switch exactly:
/// - `< 100`: band 100.
/// - `[100, 2000)`: rounds down to the nearest 100.
/// - `[2000, 10000)`: rounds down to the nearest 1000.
/// - `[10000, 30000)`: rounds down to the nearest 10000.
/// - `>= 30000`: clamps to the top band, 30000.
#[must_use]
pub fn bucket_capacity(net_capacity_mib: u64) -> u64 {
    let band = match net_capacity_mib {
        c if c < 100 => 1,
        c if c < 2_000 => c / 100,
        c if c < 10_000 => c / 1_000 * 10,
        c if c < 30_000 => c / 10_000 * 100,
        _ => 300,
    };
    band * 100
}

/// The pledge amount required for one pid, given the parent block's declared network capacity
/// (in MiB).
#[must_use]
pub fn pledge_amount(net_capacity_mib: u64) -> U256 {
    let band = bucket_capacity(net_capacity_mib);
    let price_x10 = PLEDGE_BASE
        .iter()
        .find(|(key, _)| *key == band)
        .map_or_else(|| PLEDGE_BASE.last().expect("non-empty").1, |(_, price)| *price);
    U256::from(price_x10) / U256::from(10u64)
}
