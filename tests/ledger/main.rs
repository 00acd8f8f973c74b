mod shared_test;
