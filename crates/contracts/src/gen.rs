use ethers::contract::abigen;

abigen!(
    SafeProxyFactory,
    r#"[
        function proxyCreationCode() external pure returns (bytes memory)
        function createProxyWithNonce(address singleton, bytes memory initializer, uint256 saltNonce) external returns (address proxy)
    ]"#
);

abigen!(
    Safe,
    r#"[
        function setup(address[] calldata owners, uint256 threshold, address to, bytes calldata data, address fallbackHandler, address paymentToken, uint256 payment, address paymentReceiver) external
    ]"#
);

abigen!(
    AddModulesLib,
    r#"[
        function enableModules(address[] calldata modules) external
    ]"#
);

abigen!(
    Safe4337Module,
    r#"[
        function executeUserOp(address to, uint256 value, bytes calldata data, uint8 operation) external
    ]"#
);

abigen!(
    SimpleAccountFactory,
    r#"[
        function createAccount(address owner, uint256 salt) external returns (address ret)
        function getAddress(address owner, uint256 salt) external view returns (address)
    ]"#
);

abigen!(
    SimpleAccount,
    r#"[
        function execute(address dest, uint256 value, bytes calldata func) external
    ]"#
);

abigen!(
    EntryPointAPI,
    r#"[
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
    ]"#
);
