mod math_tests;
