//! The factory contract's fixed ABI.
//!
//! The factory is already deployed and not owned by this project; the
//! interface below must match it exactly, down to the underscored
//! parameter names.

use alloy_sol_types::sol;

sol! {
    /// Deploys a new ERC20 token and records its address.
    function deployContract(string name_, string symbol_, uint8 decimals_, uint256 totalsupply_);

    /// Batched metadata read: name, symbol, decimals, raw total supply in
    /// one round trip.
    function callMultipleFunctions(address contractAddress) external view returns (string memory, string memory, uint8, uint256);

    /// Address of the token at `id` in the factory's deployment order.
    /// Behavior for `id >= length` is contract-defined (reverts).
    function getContractAddress(uint256 id) external view returns (address);

    /// Number of tokens deployed so far.
    function getLengthContractAddresses() external view returns (uint256);

    /// Emitted once per deployment with the new token's address.
    event NewContract(address indexed newContractAddress);
}
