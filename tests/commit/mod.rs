mod commit_replaced_paths;
