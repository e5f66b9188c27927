use ising_sim::Lattice;
use proptest::prelude::*;

fn lattice_strategy() -> impl Strategy<Value = Lattice> {
    (2usize..9)
        .prop_flat_map(|n| (Just(n), prop::collection::vec(any::<bool>(), n * n)))
        .prop_map(|(n, bits)| {
            let spins = bits.into_iter().map(|b| if b { 1 } else { -1 }).collect();
            Lattice::from_spins(n, 1.0, spins).unwrap()
        })
}

proptest! {
    #[test]
    fn magnetization_counts_signed_spins(lat in lattice_strategy()) {
        let n_sites = lat.n_sites() as i64;
        let up = lat.spins().iter().filter(|&&s| s == 1).count() as i64;
        let m = lat.total_magnetization();
        prop_assert_eq!(m, up - (n_sites - up));
        prop_assert!(m.abs() <= n_sites);
        prop_assert_eq!((m - n_sites).rem_euclid(2), 0);
    }

    #[test]
    fn energy_is_even_under_global_flip(lat in lattice_strategy()) {
        let mut flipped = lat.clone();
        flipped.flip_all();
        prop_assert_eq!(flipped.total_energy(), lat.total_energy());
        prop_assert_eq!(flipped.total_magnetization(), -lat.total_magnetization());
        prop_assert_eq!(flipped.recompute_bond_sum(), lat.bond_sum());
    }

    #[test]
    fn energy_bounded_by_bond_count(lat in lattice_strategy()) {
        // 2 N^2 unique bonds, each contributing -J or +J.
        let bonds = 2 * lat.n_sites() as i64;
        let e = lat.total_energy();
        prop_assert_eq!(e.fract(), 0.0);
        prop_assert!(e.abs() <= bonds as f64);
        prop_assert_eq!((e as i64 + bonds).rem_euclid(2), 0);
    }

    #[test]
    fn flip_energy_predicts_energy_change(
        lat in lattice_strategy(),
        site in any::<prop::sample::Index>(),
    ) {
        let n = lat.size();
        let flat = site.index(lat.n_sites());
        let (i, j) = (flat / n, flat % n);

        let mut after = lat.clone();
        after.flip(i, j);
        prop_assert_eq!(after.total_energy() - lat.total_energy(), lat.flip_energy(i, j));
        prop_assert_eq!(after.bond_sum(), after.recompute_bond_sum());
        prop_assert_eq!(after.total_magnetization(), after.recompute_magnetization());
    }

    #[test]
    fn neighbor_sum_matches_periodic_lookup(
        lat in lattice_strategy(),
        site in any::<prop::sample::Index>(),
    ) {
        let n = lat.size();
        let flat = site.index(lat.n_sites());
        let (i, j) = (flat / n, flat % n);
        let expected = [((i + 1) % n, j), ((i + n - 1) % n, j), (i, (j + 1) % n), (i, (j + n - 1) % n)]
            .iter()
            .map(|&(a, b)| i32::from(lat.spin(a, b)))
            .sum::<i32>();
        prop_assert_eq!(lat.energy_contribution(i, j), expected);
    }
}
