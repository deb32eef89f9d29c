#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use binpack::collectors::{BestFitIndex, best_fit_stream, par_best_fit_stream};
    use binpack::policies::{AsIs, BestFit};
    use binpack::{Bin, BinPacker, PackError};
    use itertools::Itertools;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use rayon::prelude::*;
    use test_case::test_case;

    const CAPACITY: u32 = 100;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn new_bin() -> Bin<u32> {
        Bin::new(vec![CAPACITY])
    }

    fn random_pieces(seed: u64, n: usize) -> Vec<u32> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(1..=CAPACITY)).collect_vec()
    }

    fn sorted_totals(bins: &[Bin<u32>]) -> Vec<u32> {
        bins.iter().map(|b| b.total()).sorted().collect_vec()
    }

    #[test_case(0; "seed 0")]
    #[test_case(1; "seed 1")]
    #[test_case(2; "seed 2")]
    #[test_case(3; "seed 3")]
    fn indexed_best_fit_matches_scanning_best_fit(seed: u64) {
        init_logger();
        let pieces = random_pieces(seed, 2_000);

        let scanned = BinPacker::<u32>::new()
            .with_piece_pre_order(AsIs)
            .with_packing_policy(BestFit)
            .pack_all(pieces.clone(), vec![], vec![CAPACITY])
            .unwrap();
        let indexed = best_fit_stream(pieces, new_bin, |p| p).unwrap();

        //tied bins may be picked in a different order, but the fill levels evolve identically
        assert_eq!(indexed.len(), scanned.len());
        assert_eq!(sorted_totals(&indexed), sorted_totals(&scanned));
    }

    #[test]
    fn longest_waiting_bin_wins_ties() {
        let mut index = BestFitIndex::new();
        for piece in [6, 6, 3] {
            index.insert(piece, || Bin::new(vec![10_u32])).unwrap();
        }
        assert_eq!(index.len(), 2);
        assert_eq!(index.n_pieces(), 3);

        let bins = index.into_bins();
        assert_eq!(bins[0].pieces(), &[6, 3]);
        assert_eq!(bins[1].pieces(), &[6]);
    }

    #[test]
    fn bins_are_listed_from_fullest_to_emptiest() {
        let mut index = BestFitIndex::new();
        for piece in [2, 9, 5, 7] {
            index.insert(piece, || Bin::new(vec![10_u32])).unwrap();
        }
        let remaining = index.bins().map(|b| b.max_remaining_capacity()).collect_vec();
        assert_eq!(remaining, vec![1, 3, 3]);
    }

    #[test]
    fn pieces_can_be_mapped_to_amounts() {
        let words = ["bin", "packing", "is", "np", "hard"];
        let bins = best_fit_stream(words, || Bin::new(vec![8_usize]), |w: &str| w.len()).unwrap();

        assert_eq!(bins.iter().map(|b| b.total()).sum::<usize>(), 18);
        assert!(bins.iter().all(|b| b.total() <= 8));
        assert_eq!(bins.len(), 3);
    }

    #[test]
    fn oversized_piece_is_rejected_without_mutation() {
        let mut index = BestFitIndex::new();
        index.insert(40, new_bin).unwrap();

        assert_eq!(
            index.insert(150, new_bin),
            Err(PackError::PieceExceedsNewBin {
                piece: "150".to_string(),
                capacity: "100".to_string()
            })
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.n_pieces(), 1);
        assert_eq!(index.bins().map(|b| b.total()).collect_vec(), vec![40]);
    }

    #[test]
    fn nan_piece_is_rejected() {
        let mut index = BestFitIndex::new();
        index.insert(0.5, || Bin::new(vec![1.0])).unwrap();
        index.insert(0.25, || Bin::new(vec![1.0])).unwrap();
        assert_eq!(
            index.insert(f64::NAN, || Bin::new(vec![1.0])),
            Err(PackError::NanPiece(2))
        );

        let result = best_fit_stream(vec![0.5, f64::NAN], || Bin::new(vec![1.0]), |p| p);
        assert_eq!(result, Err(PackError::NanPiece(1)));
    }

    #[test]
    fn merged_indexes_keep_all_bins() {
        let mut a = BestFitIndex::new();
        let mut b = BestFitIndex::new();
        for piece in [70, 50] {
            a.insert(piece, new_bin).unwrap();
        }
        for piece in [40, 30, 90] {
            b.insert(piece, new_bin).unwrap();
        }

        a.merge(b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.n_pieces(), 5);

        //both indexes hold a bin with 30 remaining, the one of `a` is queued first
        a.insert(30, new_bin).unwrap();
        let bins = a.into_bins();
        assert_eq!(bins.len(), 4);
        assert_eq!(sorted_totals(&bins), vec![50, 70, 90, 100]);
        assert!(bins.iter().any(|b| b.pieces() == [70, 30]));
        assert!(bins.iter().any(|b| b.pieces() == [40, 30]));
    }

    #[test_case(0; "seed 0")]
    #[test_case(42; "seed 42")]
    fn parallel_stream_conserves_pieces(seed: u64) {
        init_logger();
        let pieces = random_pieces(seed, 10_000);
        let piece_sum = pieces.iter().map(|&p| p as u64).sum::<u64>();

        let bins = par_best_fit_stream(&pieces, new_bin, |&p| p).unwrap();

        assert_eq!(bins.iter().map(|b| b.total() as u64).sum::<u64>(), piece_sum);
        assert_eq!(bins.iter().map(|b| b.pieces().len()).sum::<usize>(), pieces.len());
        assert!(bins.iter().all(|b| b.total() <= CAPACITY && !b.is_empty()));
        assert!(bins.len() as u64 >= piece_sum.div_ceil(CAPACITY as u64));
    }

    #[test]
    fn index_can_be_shared_behind_a_mutex() {
        let pieces = random_pieces(7, 5_000);
        let index = Mutex::new(BestFitIndex::new());

        pieces
            .par_iter()
            .try_for_each(|&p| index.lock().unwrap().insert(p, new_bin))
            .unwrap();

        let index = index.into_inner().unwrap();
        assert_eq!(index.n_pieces(), pieces.len());
        let bins = index.into_bins();
        assert_eq!(
            bins.iter().map(|b| b.total()).sum::<u32>(),
            pieces.iter().sum::<u32>()
        );
        assert!(bins.iter().all(|b| b.total() <= CAPACITY));
    }
}
