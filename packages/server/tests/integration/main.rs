mod cheese;
