#[cfg(test)]
mod ordered_strategy_tests {
    use crate::{
        dithering::{matrix::ThresholdMatrix, ordered::OrderedTransform},
        tests::utils::*,
        texture::{Texture, TextureRef},
        transform::prelude::*,
    };

    /// Test image size - kept small for fast tests
    const TEST_SIZE: usize = 100;

    /// Generate test data: random input channel and zeroed output
    fn test_data(size: usize) -> (Texture<u8>, Texture<u8>) {
        let channel = gen_random_channel(size, size);
        let input = Texture::from_slice(size as u32, size as u32, 1, &channel);
        let output = Texture::new(size as u32, size as u32, 1);
        (input, output)
    }

    /// Apply a strategy to the given input/output textures
    fn apply_strategy(
        strategy: OrderedTransform,
        matrix_size: u32,
        input: &Texture<u8>,
        output: &mut Texture<u8>,
    ) {
        let matrix = ThresholdMatrix::build(matrix_size).unwrap();
        let mut transform = strategy.build(matrix);
        transform.prepare(input.shape(), output.shape());
        transform.apply(input.as_texture_slice(), output.as_texture_mut_slice());
    }

    /// Macro to generate OrderedTransform comparison tests
    macro_rules! test_strategy_comparison {
        ($test_name:ident, $matrix_size:expr) => {
            #[test]
            fn $test_name() {
                let (input, mut output_a) = test_data(TEST_SIZE);
                let mut output_b = Texture::new(TEST_SIZE as u32, TEST_SIZE as u32, 1);

                apply_strategy(OrderedTransform::Seq, $matrix_size, &input, &mut output_a);
                apply_strategy(OrderedTransform::Par, $matrix_size, &input, &mut output_b);

                assert_channels_match(
                    output_a.as_ref(),
                    output_b.as_ref(),
                    TEST_SIZE,
                    "seq",
                    "par",
                );
            }
        };
    }

    test_strategy_comparison!(test_seq_vs_par_matrix_1, 1);
    test_strategy_comparison!(test_seq_vs_par_matrix_2, 2);
    test_strategy_comparison!(test_seq_vs_par_matrix_4, 4);
    test_strategy_comparison!(test_seq_vs_par_matrix_8, 8);
    test_strategy_comparison!(test_seq_vs_par_matrix_16, 16);

    #[test]
    fn test_output_is_strictly_bimodal() {
        let (input, mut output) = test_data(TEST_SIZE);
        apply_strategy(OrderedTransform::Seq, 8, &input, &mut output);

        assert!(output.as_ref().iter().all(|px| *px == 0 || *px == 255));
    }

    #[test]
    fn test_black_input_stays_black() {
        let input = uniform_channel(32, 32, 0);
        let mut output = Texture::new(32, 32, 1);
        apply_strategy(OrderedTransform::Seq, 4, &input, &mut output);

        assert!(output.as_ref().iter().all(|px| *px == 0));
    }

    #[test]
    fn test_white_input_goes_white() {
        let input = uniform_channel(32, 32, 255);
        let mut output = Texture::new(32, 32, 1);
        apply_strategy(OrderedTransform::Seq, 4, &input, &mut output);

        assert!(output.as_ref().iter().all(|px| *px == 255));
    }

    /// A second pass over an already bimodal channel must not change it.
    #[test]
    fn test_idempotent_on_bimodal_input() {
        let (input, mut first) = test_data(TEST_SIZE);
        apply_strategy(OrderedTransform::Seq, 8, &input, &mut first);

        let mut second = Texture::new(TEST_SIZE as u32, TEST_SIZE as u32, 1);
        apply_strategy(OrderedTransform::Seq, 8, &first, &mut second);

        assert_channels_match(
            first.as_ref(),
            second.as_ref(),
            TEST_SIZE,
            "first-pass",
            "second-pass",
        );
    }

    /// Mid gray against a 2x2 Bayer matrix turns into the classic
    /// checkerboard: only ranks 0 and 1 sit below 128/255.
    #[test]
    fn test_mid_gray_checkerboard_matrix_2() {
        let input = uniform_channel(4, 4, 128);
        let mut output = Texture::new(4, 4, 1);
        apply_strategy(OrderedTransform::Seq, 2, &input, &mut output);

        #[rustfmt::skip]
        let expected: [u8; 16] = [
            255, 0, 255, 0,
            0, 255, 0, 255,
            255, 0, 255, 0,
            0, 255, 0, 255,
        ];
        assert_eq!(output.as_ref(), &expected);
    }
}
