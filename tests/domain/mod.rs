mod uploaded_file_test;
